//! Sequence execution against a render engine.
//!
//! The [`Choreographer`] walks a [`Sequence`] step by step: it checks every
//! entity reference against the scene, resolves relative positions and
//! anchor references into concrete geometry, and drives the engine through
//! create, animate, and wait directives. Steps run strictly in order and a
//! step's animation completes before the next step starts; the first error
//! halts the run with the scene left in its last reached state.

use log::{debug, info};

use cueline_core::{
    element::{ShapeElement, ShapeKind, TextElement, Visibility},
    geometry::{Point, Size},
    identifier::Id,
    step::{Position, Seconds, Sequence, Step, StepAction},
};

use crate::{
    config::AppConfig,
    engine::{AnimateOp, EngineError, RenderEngine, ShapeGeometry},
    error::{CuelineError, DependencyReason},
    layout,
    scene::{EntityKind, Scene},
};

/// Summary of a finished (or aborted) choreography run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    steps_executed: usize,
    scheduled_seconds: Seconds,
    live_entities: usize,
    completed: bool,
}

impl RunReport {
    /// Returns the number of steps that ran to completion.
    pub fn steps_executed(&self) -> usize {
        self.steps_executed
    }

    /// Returns the total scheduled time of the run in seconds, animations
    /// plus pauses.
    pub fn scheduled_seconds(&self) -> Seconds {
        self.scheduled_seconds
    }

    /// Returns the number of entities still on the canvas.
    pub fn live_entities(&self) -> usize {
        self.live_entities
    }

    /// Returns true if every step in the sequence ran; false when the run
    /// was aborted early.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns true if the run finished with an empty canvas.
    pub fn all_removed(&self) -> bool {
        self.live_entities == 0
    }
}

/// Executes sequences against a [`RenderEngine`].
///
/// The choreographer owns the engine and the [`Scene`] registry for the
/// duration of a run. Several sequences may be run back to back against the
/// same choreographer; entity names persist across runs, so a removed
/// entity's name stays taken.
///
/// # Examples
///
/// ```
/// use cueline::Choreographer;
/// use cueline::config::AppConfig;
/// use cueline::engine::RecordingEngine;
/// use cueline_core::element::TextElement;
/// use cueline_core::identifier::Id;
/// use cueline_core::step::{Sequence, Step};
///
/// let sequence = Sequence::new()
///     .then(Step::write(Id::new("title"), TextElement::plain("String Theory")))
///     .then(Step::fade_out([Id::new("title")]));
///
/// let mut choreographer =
///     Choreographer::new(AppConfig::default(), RecordingEngine::new());
/// let report = choreographer.run(&sequence)?;
///
/// assert_eq!(report.steps_executed(), 2);
/// assert!(report.all_removed());
/// # Ok::<(), cueline::CuelineError>(())
/// ```
#[derive(Debug)]
pub struct Choreographer<E> {
    config: AppConfig,
    engine: E,
    scene: Scene,
}

impl<E: RenderEngine> Choreographer<E> {
    /// Creates a choreographer over the given engine.
    pub fn new(config: AppConfig, engine: E) -> Self {
        Self {
            config,
            engine,
            scene: Scene::new(),
        }
    }

    /// Returns the render engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Consumes the choreographer, returning the engine and whatever it
    /// rendered.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Returns the scene registry.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Runs a sequence to completion.
    ///
    /// # Errors
    ///
    /// Returns the first [`CuelineError`] encountered; the failing step's
    /// index is available on the error and no later step executes.
    pub fn run(&mut self, sequence: &Sequence) -> Result<RunReport, CuelineError> {
        self.run_with_abort(sequence, || false)
    }

    /// Runs a sequence, checking `abort` before each step.
    ///
    /// When `abort` returns true the run stops cleanly: the report has
    /// `completed() == false` and the scene keeps every effect of the steps
    /// that already ran.
    pub fn run_with_abort(
        &mut self,
        sequence: &Sequence,
        mut abort: impl FnMut() -> bool,
    ) -> Result<RunReport, CuelineError> {
        let mut steps_executed = 0;
        let mut scheduled_seconds: Seconds = 0.0;

        for (step_index, step) in sequence.steps().iter().enumerate() {
            if abort() {
                info!(step = step_index; "Run aborted");
                return Ok(self.report(steps_executed, scheduled_seconds, false));
            }

            self.check_dependencies(step_index, step)?;

            debug!(step = step_index; "Executing step");
            let duration = match step.action() {
                StepAction::Write { id, text, position } => {
                    self.run_write(step_index, step, *id, text, *position)?
                }
                StepAction::Create {
                    id,
                    shape,
                    position,
                } => self.run_create(step_index, step, *id, shape, *position)?,
                StepAction::FadeOut { targets } => {
                    self.run_fade_out(step_index, step, targets)?
                }
            };
            scheduled_seconds += duration;

            let pause = step
                .pause()
                .unwrap_or_else(|| self.config.timing().default_pause());
            if pause > 0.0 {
                self.engine
                    .wait(pause)
                    .map_err(|source| CuelineError::Render {
                        step: step_index,
                        source,
                    })?;
                scheduled_seconds += pause;
            }

            steps_executed += 1;
        }

        let report = self.report(steps_executed, scheduled_seconds, true);
        info!(
            steps = report.steps_executed(),
            seconds = report.scheduled_seconds(),
            live = report.live_entities();
            "Sequence complete"
        );
        Ok(report)
    }

    fn report(&self, steps_executed: usize, scheduled_seconds: Seconds, completed: bool) -> RunReport {
        RunReport {
            steps_executed,
            scheduled_seconds,
            live_entities: self.scene.live_count(),
            completed,
        }
    }

    /// Every entity a step references must be live before the step runs.
    fn check_dependencies(&self, step_index: usize, step: &Step) -> Result<(), CuelineError> {
        for entity in step.references() {
            let reason = match self.scene.get(entity) {
                None => DependencyReason::NotCreated,
                Some(record) if !record.visibility().is_live() => {
                    DependencyReason::AlreadyRemoved
                }
                Some(_) => continue,
            };
            return Err(CuelineError::Dependency {
                step: step_index,
                entity,
                reason,
            });
        }
        Ok(())
    }

    fn run_write(
        &mut self,
        step_index: usize,
        step: &Step,
        id: Id,
        text: &TextElement,
        position: Position,
    ) -> Result<Seconds, CuelineError> {
        let render_err = |source: EngineError| CuelineError::Render {
            step: step_index,
            source,
        };

        let size = self.engine.measure_text(text).map_err(render_err)?;
        let center = self.resolve_position(step_index, position, size)?;

        if !self.scene.declare(id, EntityKind::Text(text.clone())) {
            return Err(CuelineError::Duplicate {
                step: step_index,
                entity: id,
            });
        }

        self.engine.create_text(id, text, center).map_err(render_err)?;
        self.scene.set_visibility(id, Visibility::Appearing);

        let duration = step
            .duration()
            .unwrap_or_else(|| self.config.timing().write_duration());
        self.engine
            .animate(AnimateOp::Write, &[id], duration)
            .map_err(render_err)?;
        self.scene.set_visibility(id, Visibility::Visible);

        Ok(duration)
    }

    fn run_create(
        &mut self,
        step_index: usize,
        step: &Step,
        id: Id,
        shape: &ShapeElement,
        position: Option<Position>,
    ) -> Result<Seconds, CuelineError> {
        let render_err = |source: EngineError| CuelineError::Render {
            step: step_index,
            source,
        };

        let geometry = self.resolve_geometry(step_index, id, shape, position)?;

        if !self.scene.declare(id, EntityKind::Shape(*shape)) {
            return Err(CuelineError::Duplicate {
                step: step_index,
                entity: id,
            });
        }

        self.engine
            .create_shape(id, shape, geometry)
            .map_err(render_err)?;
        self.scene.set_visibility(id, Visibility::Appearing);

        let duration = step
            .duration()
            .unwrap_or_else(|| self.config.timing().draw_duration());
        self.engine
            .animate(AnimateOp::DrawIn, &[id], duration)
            .map_err(render_err)?;
        self.scene.set_visibility(id, Visibility::Visible);

        Ok(duration)
    }

    fn run_fade_out(
        &mut self,
        step_index: usize,
        step: &Step,
        targets: &[Id],
    ) -> Result<Seconds, CuelineError> {
        if targets.is_empty() {
            return Err(CuelineError::EmptyGroup { step: step_index });
        }

        for &id in targets {
            self.scene.set_visibility(id, Visibility::Fading);
        }

        let duration = step
            .duration()
            .unwrap_or_else(|| self.config.timing().fade_duration());

        // The whole group goes out as one batch; the engine fades every
        // target simultaneously
        self.engine
            .animate(AnimateOp::FadeOut, targets, duration)
            .map_err(|source| CuelineError::Render {
                step: step_index,
                source,
            })?;

        for &id in targets {
            self.scene.set_visibility(id, Visibility::Removed);
        }

        Ok(duration)
    }

    /// Resolves a placement into the concrete center point for an element
    /// of the given size.
    fn resolve_position(
        &self,
        step_index: usize,
        position: Position,
        size: Size,
    ) -> Result<Point, CuelineError> {
        match position {
            Position::Absolute(point) => Ok(point),
            Position::Relative { to, side, gap } => {
                let bounds =
                    self.engine
                        .query_bounds(to)
                        .map_err(|err| CuelineError::Layout {
                            step: step_index,
                            detail: format!("referent `{to}`: {err}"),
                        })?;
                Ok(layout::place(bounds, side, gap, size))
            }
        }
    }

    /// Resolves a shape's declared geometry into scene coordinates.
    fn resolve_geometry(
        &self,
        step_index: usize,
        id: Id,
        shape: &ShapeElement,
        position: Option<Position>,
    ) -> Result<ShapeGeometry, CuelineError> {
        match shape.kind() {
            ShapeKind::Line { start, end } => {
                if position.is_some() {
                    return Err(CuelineError::Layout {
                        step: step_index,
                        detail: format!(
                            "line `{id}` carries its own endpoints and cannot take a position"
                        ),
                    });
                }
                Ok(ShapeGeometry::Line { start, end })
            }
            ShapeKind::Square { side } => {
                let center = self.resolve_position(
                    step_index,
                    position.unwrap_or_default(),
                    Size::new(side, side),
                )?;
                Ok(ShapeGeometry::Square { center, side })
            }
            ShapeKind::Arrow {
                start,
                end,
                shorten,
            } => {
                if position.is_some() {
                    return Err(CuelineError::Layout {
                        step: step_index,
                        detail: format!(
                            "arrow `{id}` derives its geometry from its endpoints and cannot take a position"
                        ),
                    });
                }
                let start = self.resolve_point_ref(step_index, start)?;
                let end = self.resolve_point_ref(step_index, end)?;
                let (start, end) = layout::trim_segment(start, end, shorten);
                Ok(ShapeGeometry::Arrow { start, end })
            }
        }
    }

    fn resolve_point_ref(
        &self,
        step_index: usize,
        point_ref: cueline_core::element::PointRef,
    ) -> Result<Point, CuelineError> {
        use cueline_core::element::PointRef;

        match point_ref {
            PointRef::Absolute(point) => Ok(point),
            PointRef::Anchor { entity, anchor } => {
                let bounds =
                    self.engine
                        .query_bounds(entity)
                        .map_err(|err| CuelineError::Layout {
                            step: step_index,
                            detail: format!("anchor on `{entity}`: {err}"),
                        })?;
                Ok(bounds.anchor_point(anchor))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cueline_core::element::PointRef;
    use cueline_core::geometry::Anchor;

    use crate::engine::{Directive, RecordingEngine};

    use super::*;

    fn choreographer() -> Choreographer<RecordingEngine> {
        Choreographer::new(AppConfig::default(), RecordingEngine::new())
    }

    #[test]
    fn test_write_then_fade() {
        let title = Id::new("title");
        let sequence = Sequence::new()
            .then(Step::write(title, TextElement::plain("String Theory")))
            .then(Step::fade_out([title]));

        let mut choreographer = choreographer();
        let report = choreographer.run(&sequence).unwrap();

        assert_eq!(report.steps_executed(), 2);
        assert!(report.completed());
        assert!(report.all_removed());
        assert_eq!(
            choreographer.scene().get(title).unwrap().visibility(),
            Visibility::Removed
        );
    }

    #[test]
    fn test_missing_referent_fails_before_creation() {
        let sequence = Sequence::new().then(
            Step::write(Id::new("label"), TextElement::plain("orphan"))
                .at(Position::above(Id::new("ghost"), 16.0)),
        );

        let mut choreographer = choreographer();
        let err = choreographer.run(&sequence).unwrap_err();

        assert!(matches!(
            err,
            CuelineError::Dependency {
                step: 0,
                reason: DependencyReason::NotCreated,
                ..
            }
        ));
        // Nothing reached the engine
        assert!(choreographer.engine().journal().is_empty());
        assert!(choreographer.scene().is_empty());
    }

    #[test]
    fn test_removed_referent_is_rejected() {
        let line = Id::new("line");
        let sequence = Sequence::new()
            .then(Step::create(
                line,
                ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
            ))
            .then(Step::fade_out([line]))
            .then(
                Step::write(Id::new("label"), TextElement::plain("late"))
                    .at(Position::above(line, 16.0)),
            );

        let mut choreographer = choreographer();
        let err = choreographer.run(&sequence).unwrap_err();

        assert!(matches!(
            err,
            CuelineError::Dependency {
                step: 2,
                reason: DependencyReason::AlreadyRemoved,
                ..
            }
        ));
        // The first two steps took effect before the failure
        assert_eq!(choreographer.engine().animate_batches().len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let id = Id::new("twice");
        let sequence = Sequence::new()
            .then(Step::write(id, TextElement::plain("first")))
            .then(Step::write(id, TextElement::plain("second")));

        let err = choreographer().run(&sequence).unwrap_err();
        assert!(matches!(
            err,
            CuelineError::Duplicate { step: 1, entity } if entity == id
        ));
    }

    #[test]
    fn test_name_stays_taken_after_removal() {
        let id = Id::new("reused");
        let sequence = Sequence::new()
            .then(Step::write(id, TextElement::plain("first")))
            .then(Step::fade_out([id]))
            .then(Step::write(id, TextElement::plain("second")));

        let err = choreographer().run(&sequence).unwrap_err();
        assert!(matches!(err, CuelineError::Duplicate { step: 2, .. }));
    }

    #[test]
    fn test_empty_fade_group_rejected() {
        let sequence = Sequence::new().then(Step::fade_out([]));
        let err = choreographer().run(&sequence).unwrap_err();
        assert!(matches!(err, CuelineError::EmptyGroup { step: 0 }));
    }

    #[test]
    fn test_grouped_fade_is_one_batch() {
        let a = Id::new("group_a");
        let b = Id::new("group_b");
        let c = Id::new("group_c");
        let sequence = Sequence::new()
            .then(Step::write(a, TextElement::plain("a")))
            .then(Step::write(b, TextElement::plain("b")))
            .then(Step::write(c, TextElement::plain("c")))
            .then(Step::fade_out([a, b, c]));

        let mut choreographer = choreographer();
        choreographer.run(&sequence).unwrap();

        let batches = choreographer.engine().animate_batches();
        assert_eq!(batches.len(), 4);
        assert!(matches!(
            batches[3],
            Directive::Animate {
                op: AnimateOp::FadeOut,
                targets,
                ..
            } if targets.len() == 3
        ));
    }

    #[test]
    fn test_relative_placement_below() {
        let line = Id::new("line");
        let square = Id::new("square");
        let sequence = Sequence::new()
            .then(Step::create(
                line,
                ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
            ))
            .then(Step::create(square, ShapeElement::square(160.0)).at(Position::below(line, 40.0)));

        let mut choreographer = choreographer();
        choreographer.run(&sequence).unwrap();

        let bounds = choreographer.engine().query_bounds(square).unwrap();
        // Square top edge sits exactly 40 units below the line
        assert_approx_eq!(f32, bounds.min_y(), 40.0);
        assert_approx_eq!(f32, bounds.center().x(), 0.0);
    }

    #[test]
    fn test_arrow_endpoints_resolved_and_trimmed() {
        let line = Id::new("line");
        let square = Id::new("square");
        let arrow = Id::new("arrow");
        let sequence = Sequence::new()
            .then(Step::create(
                line,
                ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
            ))
            .then(Step::create(square, ShapeElement::square(160.0)).at(Position::below(line, 40.0)))
            .then(Step::create(
                arrow,
                ShapeElement::arrow(
                    PointRef::Anchor {
                        entity: line,
                        anchor: Anchor::BottomRight,
                    },
                    PointRef::Anchor {
                        entity: square,
                        anchor: Anchor::TopCenter,
                    },
                    8.0,
                ),
            ));

        let mut choreographer = choreographer();
        choreographer.run(&sequence).unwrap();

        let created = choreographer
            .engine()
            .journal()
            .iter()
            .find_map(|directive| match directive {
                Directive::CreateShape {
                    id,
                    geometry: ShapeGeometry::Arrow { start, end },
                } if *id == arrow => Some((*start, *end)),
                _ => None,
            })
            .expect("arrow create directive");

        let (start, end) = created;
        let raw_start = Point::new(240.0, 0.0);
        let raw_end = Point::new(0.0, 40.0);
        // Both endpoints pulled in by the shorten distance
        assert_approx_eq!(f32, raw_start.distance_to(start), 8.0, epsilon = 0.001);
        assert_approx_eq!(f32, raw_end.distance_to(end), 8.0, epsilon = 0.001);
    }

    #[test]
    fn test_line_with_position_is_a_layout_error() {
        let sequence = Sequence::new().then(
            Step::create(
                Id::new("line"),
                ShapeElement::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            )
            .at(Position::Absolute(Point::new(5.0, 5.0))),
        );

        let err = choreographer().run(&sequence).unwrap_err();
        assert!(matches!(err, CuelineError::Layout { step: 0, .. }));
    }

    #[test]
    fn test_timing_defaults_and_overrides() {
        let id = Id::new("timed");
        let sequence = Sequence::new()
            .then(Step::write(id, TextElement::plain("x")).with_duration(2.5))
            .then(Step::fade_out([id]).with_pause(0.0));

        let mut choreographer = choreographer();
        let report = choreographer.run(&sequence).unwrap();

        // 2.5 write + 1.0 default pause + 1.0 default fade + no pause
        assert_approx_eq!(f32, report.scheduled_seconds(), 4.5);
        assert_approx_eq!(f32, choreographer.engine().elapsed(), 4.5);
    }

    #[test]
    fn test_abort_stops_cleanly() {
        let a = Id::new("first");
        let b = Id::new("second");
        let sequence = Sequence::new()
            .then(Step::write(a, TextElement::plain("a")))
            .then(Step::write(b, TextElement::plain("b")));

        let mut choreographer = choreographer();
        let mut steps_seen = 0;
        let report = choreographer
            .run_with_abort(&sequence, || {
                steps_seen += 1;
                steps_seen > 1
            })
            .unwrap();

        assert!(!report.completed());
        assert_eq!(report.steps_executed(), 1);
        // The first step's effects survive the abort
        assert!(choreographer.scene().is_live(a));
        assert!(!choreographer.scene().is_live(b));
    }

    #[test]
    fn test_empty_sequence_completes() {
        let report = choreographer().run(&Sequence::new()).unwrap();
        assert!(report.completed());
        assert_eq!(report.steps_executed(), 0);
        assert!(report.all_removed());
    }
}
