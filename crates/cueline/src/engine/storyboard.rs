//! SVG storyboard backend.
//!
//! [`StoryboardEngine`] renders the scene as a storyboard: one SVG document
//! per completed animation batch, each showing the scene state after the
//! step's animation finished. Animation itself is not interpolated; the
//! storyboard is the sequence of keyframes a video backend would tween
//! between.
//!
//! Frames use a viewBox centered on the scene origin, so absolute positions
//! from a sequence land where a viewer expects them. Entities are composited
//! by layer (background, shapes, arrows, text) regardless of creation order.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use svg::{node::Text as SvgText, node::element as svg_element};

use cueline_core::{
    color::Color,
    element::{ShapeElement, TextElement},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    step::Seconds,
};

use crate::{
    config::StyleConfig,
    engine::{AnimateOp, EngineError, RenderEngine, ShapeGeometry, measure},
};

/// Arrowhead length as a multiple of the stroke width.
const HEAD_LENGTH_FACTOR: f32 = 4.0;

/// Arrowhead half-width as a multiple of the stroke width.
const HEAD_WIDTH_FACTOR: f32 = 1.5;

/// Stroke and fill color used when an element sets none.
const DEFAULT_INK: &str = "black";

/// Type alias for boxed SVG nodes.
type SvgNode = Box<dyn svg::Node>;

/// Z-order layers for frame composition.
///
/// Layers render bottom to top in declaration order; the `Ord` derive uses
/// declaration order, so sorting by layer yields the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum RenderLayer {
    /// Frame background fill - renders first
    Background,
    /// Lines and squares
    Content,
    /// Arrows, drawn over the shapes they connect
    Arrow,
    /// Text labels and expressions - renders last
    Text,
}

impl RenderLayer {
    fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// What a live entity looks like on the canvas.
#[derive(Debug, Clone)]
enum Visual {
    Text {
        element: TextElement,
        fill: Option<Color>,
        center: Point,
    },
    Shape {
        element: ShapeElement,
        geometry: ShapeGeometry,
    },
}

#[derive(Debug, Clone)]
struct StoryboardEntity {
    visual: Visual,
    bounds: Bounds,
    live: bool,
}

/// A render engine that produces one SVG frame per animation batch.
#[derive(Debug)]
pub struct StoryboardEngine {
    style: StyleConfig,
    entities: IndexMap<Id, StoryboardEntity>,
    frames: Vec<svg::Document>,
}

impl Default for StoryboardEngine {
    fn default() -> Self {
        Self::new(StyleConfig::default())
    }
}

impl StoryboardEngine {
    /// Creates a storyboard engine with the given style configuration.
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            entities: IndexMap::new(),
            frames: Vec::new(),
        }
    }

    /// Returns the frames rendered so far, one per animation batch.
    pub fn frames(&self) -> &[svg::Document] {
        &self.frames
    }

    /// Returns the number of frames rendered so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Writes every frame to `dir` as `frame-NNN.svg`, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Backend`] when the directory or a frame file
    /// cannot be written.
    pub fn write_frames(&self, dir: impl AsRef<Path>) -> Result<(), EngineError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|err| EngineError::Backend(err.to_string()))?;

        for (index, frame) in self.frames.iter().enumerate() {
            let path = dir.join(format!("frame-{index:03}.svg"));
            info!(path:? = path; "Writing storyboard frame");
            svg::save(&path, frame).map_err(|err| EngineError::Backend(err.to_string()))?;
        }
        Ok(())
    }

    fn entity(&self, id: Id) -> Result<&StoryboardEntity, EngineError> {
        self.entities
            .get(&id)
            .filter(|entity| entity.live)
            .ok_or(EngineError::UnknownEntity(id))
    }

    fn insert(&mut self, id: Id, visual: Visual, bounds: Bounds) -> Result<(), EngineError> {
        if self.entities.contains_key(&id) {
            return Err(EngineError::DuplicateEntity(id));
        }
        self.entities.insert(
            id,
            StoryboardEntity {
                visual,
                bounds,
                live: true,
            },
        );
        Ok(())
    }

    /// Renders the current scene state as one SVG document.
    fn render_frame(&self) -> svg::Document {
        let frame_size = self.style.frame_size();
        let min_x = -frame_size.width() / 2.0;
        let min_y = -frame_size.height() / 2.0;

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{min_x} {min_y} {} {}",
                    frame_size.width(),
                    frame_size.height()
                ),
            )
            .set("width", frame_size.width())
            .set("height", frame_size.height());

        let mut items: Vec<(RenderLayer, SvgNode)> = Vec::new();

        // Config is validated before a run starts, so a bad color string
        // here degrades to an uncolored background rather than an error
        if let Ok(Some(background)) = self.style.background_color() {
            let rect = svg_element::Rectangle::new()
                .set("x", min_x)
                .set("y", min_y)
                .set("width", frame_size.width())
                .set("height", frame_size.height())
                .set("fill", background.to_string());
            items.push((RenderLayer::Background, Box::new(rect)));
        }

        for (id, entity) in &self.entities {
            if !entity.live {
                continue;
            }
            match &entity.visual {
                Visual::Text {
                    element,
                    fill,
                    center,
                } => {
                    let node = self.render_text(*id, element, *fill, *center);
                    items.push((RenderLayer::Text, node));
                }
                Visual::Shape { element, geometry } => {
                    items.extend(self.render_shape(*id, element, *geometry));
                }
            }
        }

        // Stable sort keeps creation order within each layer
        items.sort_by_key(|(layer, _)| *layer);

        let mut current: Option<(RenderLayer, svg_element::Group)> = None;
        for (layer, node) in items {
            let group = match current.take() {
                Some((open_layer, group)) if open_layer == layer => group,
                Some((_, group)) => {
                    doc = doc.add(group);
                    svg_element::Group::new().set("data-layer", layer.name())
                }
                None => svg_element::Group::new().set("data-layer", layer.name()),
            };
            current = Some((layer, group.add(node)));
        }
        if let Some((_, group)) = current {
            doc = doc.add(group);
        }

        doc
    }

    /// Renders a text entity centered at `center`.
    ///
    /// Mathematical markup is emitted verbatim; proper typesetting is a
    /// concern for richer backends.
    fn render_text(
        &self,
        id: Id,
        element: &TextElement,
        fill: Option<Color>,
        center: Point,
    ) -> SvgNode {
        let lines: Vec<&str> = element.content().lines().collect();
        let text_size = measure::text_size(element);
        let line_height = if lines.is_empty() {
            0.0
        } else {
            text_size.height() / lines.len() as f32
        };

        // Each tspan advances by one line height, so start half the block
        // (plus one advance) above the center
        let y_offset = -(text_size.height() + line_height) / 2.0;

        let mut rendered = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", element.style().font_family())
            .set("font-size", element.style().scaled_font_size())
            .set("data-entity", id.to_string());

        if let Some(fill) = fill {
            rendered = rendered
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha());
        } else {
            rendered = rendered.set("fill", DEFAULT_INK);
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", center.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        Box::new(rendered)
    }

    /// Renders a shape entity from its resolved geometry.
    fn render_shape(
        &self,
        id: Id,
        element: &ShapeElement,
        geometry: ShapeGeometry,
    ) -> Vec<(RenderLayer, SvgNode)> {
        let stroke_width = self.style.stroke_width();
        let opacity = element.opacity();

        match geometry {
            ShapeGeometry::Line { start, end } => {
                let line = stroked_line(start, end, stroke_width, opacity)
                    .set("data-entity", id.to_string());
                vec![(RenderLayer::Content, Box::new(line))]
            }
            ShapeGeometry::Square { center, side } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", center.x() - side / 2.0)
                    .set("y", center.y() - side / 2.0)
                    .set("width", side)
                    .set("height", side)
                    .set("fill", "none")
                    .set("stroke", DEFAULT_INK)
                    .set("stroke-width", stroke_width)
                    .set("stroke-opacity", opacity)
                    .set("data-entity", id.to_string());
                vec![(RenderLayer::Content, Box::new(rect))]
            }
            ShapeGeometry::Arrow { start, end } => {
                let mut nodes: Vec<(RenderLayer, SvgNode)> = Vec::new();

                let length = start.distance_to(end);
                if length <= f32::EPSILON {
                    // Degenerate arrow collapses to a point; emit nothing
                    debug!(id = id.to_string(); "Skipping zero-length arrow");
                    return nodes;
                }

                let head_length = (stroke_width * HEAD_LENGTH_FACTOR).min(length / 2.0);
                let base = end.towards(start, head_length);

                let shaft = stroked_line(start, base, stroke_width, opacity)
                    .set("data-entity", id.to_string());
                nodes.push((RenderLayer::Arrow, Box::new(shaft)));

                let half_width = stroke_width * HEAD_WIDTH_FACTOR;
                let dx = (end.x() - start.x()) / length;
                let dy = (end.y() - start.y()) / length;
                let left = Point::new(base.x() - dy * half_width, base.y() + dx * half_width);
                let right = Point::new(base.x() + dy * half_width, base.y() - dx * half_width);

                let head = svg_element::Polygon::new()
                    .set(
                        "points",
                        format!(
                            "{},{} {},{} {},{}",
                            end.x(),
                            end.y(),
                            left.x(),
                            left.y(),
                            right.x(),
                            right.y()
                        ),
                    )
                    .set("fill", DEFAULT_INK)
                    .set("fill-opacity", opacity)
                    .set("data-entity", id.to_string());
                nodes.push((RenderLayer::Arrow, Box::new(head)));

                nodes
            }
        }
    }
}

fn stroked_line(start: Point, end: Point, stroke_width: f32, opacity: f32) -> svg_element::Line {
    svg_element::Line::new()
        .set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y())
        .set("stroke", DEFAULT_INK)
        .set("stroke-width", stroke_width)
        .set("stroke-linecap", "round")
        .set("stroke-opacity", opacity)
}

impl RenderEngine for StoryboardEngine {
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
        let fill = text.style().color().map_err(EngineError::Backend)?;
        let bounds = center.to_bounds(measure::text_size(text));
        self.insert(
            id,
            Visual::Text {
                element: text.clone(),
                fill,
                center,
            },
            bounds,
        )
    }

    fn create_shape(
        &mut self,
        id: Id,
        shape: &ShapeElement,
        geometry: ShapeGeometry,
    ) -> Result<(), EngineError> {
        shape.validate()?;
        self.insert(
            id,
            Visual::Shape {
                element: *shape,
                geometry,
            },
            geometry.bounds(),
        )
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

        debug!(op:? = op, targets = targets.len(), duration = duration; "Rendering frame");
        let frame = self.render_frame();
        self.frames.push(frame);
        Ok(())
    }

    fn query_bounds(&self, id: Id) -> Result<Bounds, EngineError> {
        Ok(self.entity(id)?.bounds)
    }

    fn wait(&mut self, _duration: Seconds) -> Result<(), EngineError> {
        // A pause holds the last frame; the storyboard gains nothing new
        Ok(())
    }
}
