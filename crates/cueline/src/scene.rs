//! Scene state owned by the choreographer.
//!
//! A [`Scene`] is the insertion-ordered registry of entities a run has
//! declared, together with their [`Visibility`] lifecycle state. The scene
//! is owned by a `Choreographer` instance and mutated only by completed
//! steps; there is no process-wide canvas.

use indexmap::IndexMap;

use cueline_core::{
    element::{ShapeElement, TextElement, Visibility},
    identifier::Id,
};

/// What kind of element an entity is.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Text(TextElement),
    Shape(ShapeElement),
}

/// A registered entity: its element definition plus lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    kind: EntityKind,
    visibility: Visibility,
}

impl EntityRecord {
    /// Returns the element definition.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Returns the current lifecycle state.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// Insertion-ordered registry of scene entities.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: IndexMap<Id, EntityRecord>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new entity in the [`Visibility::Hidden`] state.
    ///
    /// Returns `false` if the id is already taken (including by a removed
    /// entity; names are never reused within a scene).
    pub fn declare(&mut self, id: Id, kind: EntityKind) -> bool {
        if self.entities.contains_key(&id) {
            return false;
        }
        self.entities.insert(
            id,
            EntityRecord {
                kind,
                visibility: Visibility::Hidden,
            },
        );
        true
    }

    /// Looks up an entity record by id.
    pub fn get(&self, id: Id) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    /// Returns true if the entity exists and is on the canvas.
    pub fn is_live(&self, id: Id) -> bool {
        self.entities
            .get(&id)
            .is_some_and(|record| record.visibility().is_live())
    }

    /// Advances an entity's lifecycle state.
    ///
    /// The choreographer drives transitions in step order; unknown ids are
    /// ignored (dependency checks happen before any transition).
    pub fn set_visibility(&mut self, id: Id, visibility: Visibility) {
        if let Some(record) = self.entities.get_mut(&id) {
            record.visibility = visibility;
        }
    }

    /// Returns the number of declared entities, regardless of state.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity has been declared.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the number of entities currently on the canvas.
    pub fn live_count(&self) -> usize {
        self.entities
            .values()
            .filter(|record| record.visibility().is_live())
            .count()
    }
}
