//! Renders the string-theory walkthrough scene as an SVG storyboard.
//!
//! Run with `cargo run --example string_theory -- [output-dir]`; frames land
//! in `storyboard/` by default.

use std::error::Error;

use cueline::Choreographer;
use cueline::config::AppConfig;
use cueline::engine::StoryboardEngine;
use cueline_core::element::{PointRef, ShapeElement, TextElement, TextStyle};
use cueline_core::geometry::{Anchor, Point};
use cueline_core::identifier::Id;
use cueline_core::step::{Position, Sequence, Step};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let output_dir = std::env::args().nth(1).unwrap_or_else(|| "storyboard".to_string());

    let title = Id::new("title");
    let action = Id::new("polyakov_action");
    let line = Id::new("string_line");
    let string_label = Id::new("string_label");
    let square = Id::new("extra_dimensions");
    let dims_label = Id::new("dims_label");
    let arrow = Id::new("dims_arrow");

    let sequence = Sequence::new()
        .then(Step::write(
            title,
            TextElement::math(r"\textbf{String Theory}")
                .with_style(TextStyle::new().with_scale(1.2)),
        ))
        .then(Step::fade_out([title]))
        .then(
            Step::write(
                action,
                TextElement::math(
                    r"S = \frac{-1}{2\pi \alpha'}\int d^2\sigma \sqrt{-h}\, h^{ab}\, \partial_a X^\mu \partial_b X^\mu g_{\mu\nu}",
                ),
            )
            .at(Position::Absolute(Point::new(0.0, -160.0))),
        )
        .then(Step::create(
            line,
            ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
        ))
        .then(
            Step::write(string_label, TextElement::plain("Vibrating String"))
                .at(Position::above(line, 16.0)),
        )
        .then(
            Step::create(square, ShapeElement::square(160.0).with_opacity(0.5))
                .at(Position::below(line, 40.0)),
        )
        .then(
            Step::write(dims_label, TextElement::plain("Extra Dimensions"))
                .at(Position::below(square, 8.0)),
        )
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
        ))
        .then(Step::fade_out([
            action,
            line,
            string_label,
            square,
            dims_label,
            arrow,
        ]));

    let mut choreographer =
        Choreographer::new(AppConfig::default(), StoryboardEngine::default());
    let report = choreographer.run(&sequence)?;

    let engine = choreographer.into_engine();
    engine.write_frames(&output_dir)?;

    println!(
        "Rendered {} frames ({}s scheduled) to {output_dir}/",
        engine.frame_count(),
        report.scheduled_seconds(),
    );
    Ok(())
}
