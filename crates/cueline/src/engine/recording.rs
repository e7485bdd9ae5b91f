//! An in-memory render engine that journals every directive.
//!
//! [`RecordingEngine`] performs no drawing. It tracks entity bounds (so
//! `query_bounds` answers real geometry), accumulates scheduled time, and
//! appends every directive to a journal in arrival order. Tests assert
//! ordering and batching properties against the journal; callers can use it
//! as a dry-run backend to check a sequence before rendering for real.

use indexmap::IndexMap;

use cueline_core::{
    element::{ShapeElement, TextElement},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    step::Seconds,
};

use crate::engine::{
    AnimateOp, Directive, EngineError, RenderEngine, ShapeGeometry, measure,
};

#[derive(Debug, Clone)]
struct RecordedEntity {
    bounds: Bounds,
    live: bool,
}

/// A render engine that records directives instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    entities: IndexMap<Id, RecordedEntity>,
    journal: Vec<Directive>,
    elapsed: Seconds,
}

impl RecordingEngine {
    /// Creates an empty recording engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every directive received, in arrival order.
    pub fn journal(&self) -> &[Directive] {
        &self.journal
    }

    /// Returns only the animate directives, in arrival order.
    ///
    /// One animate batch is issued per step, so this is the step-level view
    /// of the run.
    pub fn animate_batches(&self) -> Vec<&Directive> {
        self.journal
            .iter()
            .filter(|directive| matches!(directive, Directive::Animate { .. }))
            .collect()
    }

    /// Returns the total scheduled time (animations plus pauses) in seconds.
    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    /// Returns the number of entities currently on the canvas.
    pub fn live_count(&self) -> usize {
        self.entities.values().filter(|entity| entity.live).count()
    }

    fn entity(&self, id: Id) -> Result<&RecordedEntity, EngineError> {
        self.entities
            .get(&id)
            .filter(|entity| entity.live)
            .ok_or(EngineError::UnknownEntity(id))
    }

    fn insert(&mut self, id: Id, bounds: Bounds) -> Result<(), EngineError> {
        if self.entities.contains_key(&id) {
            return Err(EngineError::DuplicateEntity(id));
        }
        self.entities.insert(id, RecordedEntity { bounds, live: true });
        Ok(())
    }
}

impl RenderEngine for RecordingEngine {
    fn measure_text(&self, text: &TextElement) -> Result<Size, EngineError> {
        text.validate()?;
        Ok(measure::text_size(text))
    }

    fn create_text(
        &mut self,
        id: Id,
        text: &TextElement,
        center: Point,
    ) -> Result<(), EngineError> {
        text.validate()?;
        let bounds = center.to_bounds(measure::text_size(text));
        self.insert(id, bounds)?;
        self.journal.push(Directive::CreateText { id, center });
        Ok(())
    }

    fn create_shape(
        &mut self,
        id: Id,
        shape: &ShapeElement,
        geometry: ShapeGeometry,
    ) -> Result<(), EngineError> {
        shape.validate()?;
        self.insert(id, geometry.bounds())?;
        self.journal.push(Directive::CreateShape { id, geometry });
        Ok(())
    }

    fn animate(
        &mut self,
        op: AnimateOp,
        targets: &[Id],
        duration: Seconds,
    ) -> Result<(), EngineError> {
        if targets.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        for &id in targets {
            self.entity(id)?;
        }
        if op == AnimateOp::FadeOut {
            for &id in targets {
                if let Some(entity) = self.entities.get_mut(&id) {
                    entity.live = false;
                }
            }
        }
        self.journal.push(Directive::Animate {
            op,
            targets: targets.to_vec(),
            duration,
        });
        self.elapsed += duration;
        Ok(())
    }

    fn query_bounds(&self, id: Id) -> Result<Bounds, EngineError> {
        Ok(self.entity(id)?.bounds)
    }

    fn wait(&mut self, duration: Seconds) -> Result<(), EngineError> {
        self.journal.push(Directive::Wait { duration });
        self.elapsed += duration;
        Ok(())
    }
}
