//! Text element definitions for scene labels and mathematical expressions.
//!
//! [`TextElement`] pairs typeset content with a [`TextStyle`]. Mathematical
//! content ([`TextKind::Math`]) is carried as markup and passed through to
//! the render engine verbatim; the choreographer only performs shallow
//! validation (non-empty, balanced braces) and leaves typesetting to the
//! engine.

use serde::Deserialize;

use crate::{color::Color, element::ElementError};

/// How the content of a [`TextElement`] should be typeset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextKind {
    /// Plain label text
    #[default]
    Plain,
    /// Mathematical expression markup (e.g. TeX), typeset by the engine
    Math,
}

/// Visual style for a text element.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"serif"` |
/// | Font size | `28` |
/// | Color | `None` (engine default) |
/// | Scale | `1.0` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    font_family: String,
    font_size: u16,
    color: Option<String>,
    scale: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "serif".to_string(),
            font_size: 28,
            color: None,
            scale: 1.0,
        }
    }
}

impl TextStyle {
    /// Creates a new text style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font family (builder style).
    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self
    }

    /// Sets the font size in points (builder style).
    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the text color as a CSS color string (builder style).
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Sets the scale factor applied on top of the font size (builder style).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the effective font size in points after scaling.
    pub fn scaled_font_size(&self) -> f32 {
        self.font_size as f32 * self.scale
    }

    /// Returns the parsed text [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn color(&self) -> Result<Option<Color>, String> {
        self.color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid text color: {err}"))
    }
}

/// A typeset scene element: a plain label or a mathematical expression.
///
/// # Examples
///
/// ```
/// use cueline_core::element::{TextElement, TextKind, TextStyle};
///
/// let title = TextElement::math(r"\textbf{String Theory}")
///     .with_style(TextStyle::new().with_scale(1.2));
///
/// assert_eq!(title.kind(), TextKind::Math);
/// assert!(title.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextElement {
    content: String,
    #[serde(default)]
    kind: TextKind,
    #[serde(default)]
    style: TextStyle,
}

impl TextElement {
    /// Creates a plain text element with the default style.
    pub fn plain(content: &str) -> Self {
        Self {
            content: content.to_string(),
            kind: TextKind::Plain,
            style: TextStyle::default(),
        }
    }

    /// Creates a mathematical expression element with the default style.
    ///
    /// The content is markup interpreted by the render engine.
    pub fn math(content: &str) -> Self {
        Self {
            content: content.to_string(),
            kind: TextKind::Math,
            style: TextStyle::default(),
        }
    }

    /// Replaces the style (builder style).
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the raw content of this element.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns how the content should be typeset.
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// Returns the text style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Shallow validation of the element.
    ///
    /// Checks that the content is non-empty and, for math content, that
    /// braces are balanced. Engines perform their own full markup
    /// validation; this catches the cheap cases before a directive is
    /// issued.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::EmptyContent`] or
    /// [`ElementError::UnbalancedMath`].
    pub fn validate(&self) -> Result<(), ElementError> {
        if self.content.trim().is_empty() {
            return Err(ElementError::EmptyContent);
        }
        if self.kind == TextKind::Math {
            let mut depth: i32 = 0;
            let mut escaped = false;
            for ch in self.content.chars() {
                if escaped {
                    escaped = false;
                    continue;
                }
                match ch {
                    '\\' => escaped = true,
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    return Err(ElementError::UnbalancedMath(self.content.clone()));
                }
            }
            if depth != 0 {
                return Err(ElementError::UnbalancedMath(self.content.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_plain_text_defaults() {
        let label = TextElement::plain("Vibrating String");
        assert_eq!(label.content(), "Vibrating String");
        assert_eq!(label.kind(), TextKind::Plain);
        assert_approx_eq!(f32, label.style().scale(), 1.0);
    }

    #[test]
    fn test_math_text() {
        let expr = TextElement::math(r"S = \frac{-1}{2\pi \alpha'}");
        assert_eq!(expr.kind(), TextKind::Math);
        assert!(expr.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_content() {
        let empty = TextElement::plain("   ");
        assert_eq!(empty.validate(), Err(ElementError::EmptyContent));
    }

    #[test]
    fn test_validate_unbalanced_math() {
        let open = TextElement::math(r"\frac{1}{2");
        assert!(matches!(
            open.validate(),
            Err(ElementError::UnbalancedMath(_))
        ));

        let closed_early = TextElement::math(r"x}");
        assert!(matches!(
            closed_early.validate(),
            Err(ElementError::UnbalancedMath(_))
        ));
    }

    #[test]
    fn test_validate_escaped_braces() {
        // `\{` and `\}` are literal braces in markup and must not count
        let escaped = TextElement::math(r"\{a, b\}");
        assert!(escaped.validate().is_ok());
    }

    #[test]
    fn test_plain_text_skips_brace_check() {
        let label = TextElement::plain("an { unbalanced brace");
        assert!(label.validate().is_ok());
    }

    #[test]
    fn test_style_builder() {
        let style = TextStyle::new()
            .with_font_family("monospace")
            .with_font_size(14)
            .with_scale(1.2)
            .with_color("navy");

        assert_eq!(style.font_family(), "monospace");
        assert_eq!(style.font_size(), 14);
        assert_approx_eq!(f32, style.scaled_font_size(), 16.8, epsilon = 0.001);
        assert!(style.color().unwrap().is_some());
    }

    #[test]
    fn test_style_invalid_color() {
        let style = TextStyle::new().with_color("not-a-color");
        assert!(style.color().is_err());
    }
}
