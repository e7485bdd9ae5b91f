//! Text measurement for the bundled render engines.
//!
//! Maintains a process-wide reusable [`FontSystem`] to avoid expensive
//! recreation; measurement uses real font metrics and shaping where fonts
//! are available, with a metric-based estimate as fallback (e.g. in
//! environments with no installed fonts).

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::debug;

use cueline_core::{element::TextElement, geometry::Size};

/// Points-to-pixels conversion at standard DPI.
const PT_TO_PX: f32 = 1.33;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Average glyph advance as a fraction of the font size, used when no
/// shaped layout is available.
const ESTIMATED_ADVANCE: f32 = 0.55;

static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

fn font_system() -> &'static Mutex<FontSystem> {
    FONT_SYSTEM.get_or_init(|| {
        debug!("Initializing FontSystem");
        Mutex::new(FontSystem::new())
    })
}

/// Calculates the size a text element occupies once typeset.
///
/// Mathematical content is measured as its raw markup string; reference
/// engines display markup verbatim (typesetting proper is an engine
/// concern outside this crate).
pub(crate) fn text_size(text: &TextElement) -> Size {
    let content = text.content();
    if content.is_empty() {
        return Size::default();
    }

    let font_size_px = text.style().scaled_font_size() * PT_TO_PX;
    let line_height = font_size_px * LINE_HEIGHT_FACTOR;
    let metrics = Metrics::new(font_size_px, line_height);

    let mut font_system = font_system().lock().expect("failed to lock FontSystem");

    let mut buffer = Buffer::new(&mut font_system, metrics);
    let mut buffer = buffer.borrow_with(&mut font_system);

    let attrs = Attrs::new().family(Family::Name(text.style().font_family()));

    // Unlimited buffer size lets the text flow naturally
    buffer.set_size(None, None);
    buffer.set_text(content, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(true);

    let mut max_width: f32 = 0.0;
    let mut total_height: f32 = 0.0;

    let layout_runs: Vec<_> = buffer.layout_runs().collect();
    if !layout_runs.is_empty() {
        for last in layout_runs.iter().map(|run| run.glyphs.last()) {
            if let Some(last) = last {
                let run_width = last.x + last.w;
                max_width = max_width.max(run_width);
            }
            total_height += metrics.line_height;
        }
    }

    // Fall back to a metric estimate when shaping produced nothing
    // (no fonts installed, or every glyph was whitespace)
    if max_width == 0.0 {
        let longest_line = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        max_width = longest_line as f32 * font_size_px * ESTIMATED_ADVANCE;
    }
    if total_height == 0.0 {
        total_height = content.lines().count().max(1) as f32 * metrics.line_height;
    }

    Size::new(max_width, total_height)
}
