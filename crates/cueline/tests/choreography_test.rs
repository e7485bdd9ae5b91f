//! End-to-end choreography runs over the bundled engines.

use float_cmp::assert_approx_eq;

use cueline::config::AppConfig;
use cueline::engine::{AnimateOp, Directive, RecordingEngine, StoryboardEngine};
use cueline::{Choreographer, CuelineError, DependencyReason};
use cueline_core::element::{PointRef, ShapeElement, TextElement, TextStyle, Visibility};
use cueline_core::geometry::{Anchor, Point};
use cueline_core::identifier::Id;
use cueline_core::step::{Position, Sequence, Step};

struct SceneIds {
    title: Id,
    action: Id,
    line: Id,
    string_label: Id,
    square: Id,
    dims_label: Id,
    arrow: Id,
}

impl SceneIds {
    fn new() -> Self {
        Self {
            title: Id::new("title"),
            action: Id::new("polyakov_action"),
            line: Id::new("string_line"),
            string_label: Id::new("string_label"),
            square: Id::new("extra_dimensions"),
            dims_label: Id::new("dims_label"),
            arrow: Id::new("dims_arrow"),
        }
    }
}

/// A full scene walk: the title appears and fades, then the Polyakov action,
/// a vibrating string with its label, a square standing in for compactified
/// dimensions, an arrow tying them together, and one grouped teardown of all
/// six remaining entities.
fn string_theory_sequence(ids: &SceneIds) -> Sequence {
    Sequence::new()
        .then(Step::write(
            ids.title,
            TextElement::math(r"\textbf{String Theory}")
                .with_style(TextStyle::new().with_scale(1.2)),
        ))
        .then(Step::fade_out([ids.title]))
        .then(
            Step::write(
                ids.action,
                TextElement::math(
                    r"S = \frac{-1}{2\pi \alpha'}\int d^2\sigma \sqrt{-h}\, h^{ab}\, \partial_a X^\mu \partial_b X^\mu g_{\mu\nu}",
                ),
            )
            .at(Position::Absolute(Point::new(0.0, -160.0))),
        )
        .then(Step::create(
            ids.line,
            ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
        ))
        .then(
            Step::write(ids.string_label, TextElement::plain("Vibrating String"))
                .at(Position::above(ids.line, 16.0)),
        )
        .then(
            Step::create(ids.square, ShapeElement::square(160.0).with_opacity(0.5))
                .at(Position::below(ids.line, 40.0)),
        )
        .then(
            Step::write(ids.dims_label, TextElement::plain("Extra Dimensions"))
                .at(Position::below(ids.square, 8.0)),
        )
        .then(Step::create(
            ids.arrow,
            ShapeElement::arrow(
                PointRef::Anchor {
                    entity: ids.line,
                    anchor: Anchor::BottomRight,
                },
                PointRef::Anchor {
                    entity: ids.square,
                    anchor: Anchor::TopCenter,
                },
                8.0,
            ),
        ))
        .then(Step::fade_out([
            ids.action,
            ids.line,
            ids.string_label,
            ids.square,
            ids.dims_label,
            ids.arrow,
        ]))
}

#[test]
fn full_scene_runs_to_an_empty_canvas() {
    let ids = SceneIds::new();
    let sequence = string_theory_sequence(&ids);
    assert_eq!(sequence.len(), 9);

    let mut choreographer = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    let report = choreographer.run(&sequence).unwrap();

    assert!(report.completed());
    assert_eq!(report.steps_executed(), 9);
    assert!(report.all_removed());

    // Every entity was declared and every one ended removed
    assert_eq!(choreographer.scene().len(), 7);
    assert_eq!(choreographer.scene().live_count(), 0);

    // Nine steps, nine animation batches, default 1s each plus a 1s pause
    assert_eq!(choreographer.engine().animate_batches().len(), 9);
    assert_approx_eq!(f32, choreographer.engine().elapsed(), 18.0);
}

#[test]
fn batches_arrive_in_step_order() {
    let ids = SceneIds::new();
    let mut choreographer = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    choreographer.run(&string_theory_sequence(&ids)).unwrap();

    let ops: Vec<AnimateOp> = choreographer
        .engine()
        .animate_batches()
        .iter()
        .map(|directive| match directive {
            Directive::Animate { op, .. } => *op,
            _ => unreachable!("animate_batches only yields animate directives"),
        })
        .collect();

    assert_eq!(
        ops,
        vec![
            AnimateOp::Write,
            AnimateOp::FadeOut,
            AnimateOp::Write,
            AnimateOp::DrawIn,
            AnimateOp::Write,
            AnimateOp::DrawIn,
            AnimateOp::Write,
            AnimateOp::DrawIn,
            AnimateOp::FadeOut,
        ]
    );
}

#[test]
fn title_fades_mid_sequence_and_later_steps_still_build() {
    let ids = SceneIds::new();
    let mut choreographer = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    choreographer.run(&string_theory_sequence(&ids)).unwrap();

    let scene = choreographer.scene();
    assert_eq!(
        scene.get(ids.title).unwrap().visibility(),
        Visibility::Removed
    );
    // Six entities were created after the title left the canvas
    for id in [
        ids.action,
        ids.line,
        ids.string_label,
        ids.square,
        ids.dims_label,
        ids.arrow,
    ] {
        assert!(scene.get(id).is_some(), "`{id}` should have been declared");
    }
}

#[test]
fn grouped_teardown_is_one_batch_of_six() {
    let ids = SceneIds::new();
    let mut choreographer = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    choreographer.run(&string_theory_sequence(&ids)).unwrap();

    let batches = choreographer.engine().animate_batches();

    // The title fades alone, early in the sequence
    let Directive::Animate { op, targets, .. } = batches[1] else {
        panic!("expected animate directive");
    };
    assert_eq!(*op, AnimateOp::FadeOut);
    assert_eq!(targets, &vec![ids.title]);

    // Every remaining entity goes out together in a single atomic batch
    let Directive::Animate { op, targets, .. } = batches[8] else {
        panic!("expected animate directive");
    };
    assert_eq!(*op, AnimateOp::FadeOut);
    assert_eq!(
        targets,
        &vec![
            ids.action,
            ids.line,
            ids.string_label,
            ids.square,
            ids.dims_label,
            ids.arrow,
        ]
    );
}

#[test]
fn dependency_failure_halts_and_keeps_prior_state() {
    let ids = SceneIds::new();
    // The label references the line one step too early
    let sequence = Sequence::new()
        .then(
            Step::write(ids.string_label, TextElement::plain("Vibrating String"))
                .at(Position::above(ids.line, 16.0)),
        )
        .then(Step::create(
            ids.line,
            ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
        ));

    let mut choreographer = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    let err = choreographer.run(&sequence).unwrap_err();

    match err {
        CuelineError::Dependency {
            step,
            entity,
            reason,
        } => {
            assert_eq!(step, 0);
            assert_eq!(entity, ids.line);
            assert_eq!(reason, DependencyReason::NotCreated);
        }
        other => panic!("expected dependency error, got {other}"),
    }

    // The run halted before anything reached the engine
    assert!(choreographer.engine().journal().is_empty());
}

#[test]
fn storyboard_renders_one_frame_per_step() {
    let ids = SceneIds::new();
    let mut choreographer =
        Choreographer::new(AppConfig::default(), StoryboardEngine::default());
    let report = choreographer.run(&string_theory_sequence(&ids)).unwrap();

    assert!(report.all_removed());

    let engine = choreographer.into_engine();
    assert_eq!(engine.frame_count(), 9);

    // The title has the stage to itself, then leaves it empty
    let first = engine.frames()[0].to_string();
    assert!(first.contains("title"));
    assert!(!first.contains("string_line"));
    let second = engine.frames()[1].to_string();
    assert!(!second.contains("data-entity"));

    // By the arrow step the six remaining entities are all on canvas
    let eighth = engine.frames()[7].to_string();
    for name in [
        "polyakov_action",
        "string_line",
        "string_label",
        "extra_dimensions",
        "dims_label",
        "dims_arrow",
    ] {
        assert!(eighth.contains(name), "frame 8 should contain `{name}`");
    }
    assert!(!eighth.contains(r#"data-entity="title""#));

    // The grouped teardown leaves a bare final frame
    let last = engine.frames()[8].to_string();
    assert!(!last.contains("data-entity"));
}

#[test]
fn same_sequence_yields_identical_geometry() {
    let ids = SceneIds::new();
    let sequence = string_theory_sequence(&ids);

    let mut first = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    first.run(&sequence).unwrap();
    let mut second = Choreographer::new(AppConfig::default(), RecordingEngine::new());
    second.run(&sequence).unwrap();

    assert_eq!(first.engine().journal(), second.engine().journal());
}
