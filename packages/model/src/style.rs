//! Style vocabulary and the default table.
//!
//! A block's [`StyleSet`] is sparse. Anything absent (or empty) resolves to
//! the value in [`StyleKey::default_value`]; both the renderer and the editor
//! form go through [`EffectiveStyle`] so they can never disagree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker that ends the image/text pairing of the side-by-side layout.
pub const FULL_WIDTH: &str = "fullWidth";

/// Style keys understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    FontSize,
    FontWeight,
    Color,
    LineHeight,
    LetterSpacing,
    TextAlign,
    MarginTop,
    MarginBottom,
    MarginRight,
    Opacity,
    Display,
    Width,
    Height,
    Padding,
    BackgroundColor,
    BorderLeft,
    Border,
    BorderRadius,
    BoxShadow,
}

impl StyleKey {
    pub const ALL: [StyleKey; 19] = [
        StyleKey::FontSize,
        StyleKey::FontWeight,
        StyleKey::Color,
        StyleKey::LineHeight,
        StyleKey::LetterSpacing,
        StyleKey::TextAlign,
        StyleKey::MarginTop,
        StyleKey::MarginBottom,
        StyleKey::MarginRight,
        StyleKey::Opacity,
        StyleKey::Display,
        StyleKey::Width,
        StyleKey::Height,
        StyleKey::Padding,
        StyleKey::BackgroundColor,
        StyleKey::BorderLeft,
        StyleKey::Border,
        StyleKey::BorderRadius,
        StyleKey::BoxShadow,
    ];

    /// Key as stored in the JSON document
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKey::FontSize => "fontSize",
            StyleKey::FontWeight => "fontWeight",
            StyleKey::Color => "color",
            StyleKey::LineHeight => "lineHeight",
            StyleKey::LetterSpacing => "letterSpacing",
            StyleKey::TextAlign => "textAlign",
            StyleKey::MarginTop => "marginTop",
            StyleKey::MarginBottom => "marginBottom",
            StyleKey::MarginRight => "marginRight",
            StyleKey::Opacity => "opacity",
            StyleKey::Display => "display",
            StyleKey::Width => "width",
            StyleKey::Height => "height",
            StyleKey::Padding => "padding",
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::BorderLeft => "borderLeft",
            StyleKey::Border => "border",
            StyleKey::BorderRadius => "borderRadius",
            StyleKey::BoxShadow => "boxShadow",
        }
    }

    /// CSS property name
    pub fn css_property(self) -> &'static str {
        match self {
            StyleKey::FontSize => "font-size",
            StyleKey::FontWeight => "font-weight",
            StyleKey::Color => "color",
            StyleKey::LineHeight => "line-height",
            StyleKey::LetterSpacing => "letter-spacing",
            StyleKey::TextAlign => "text-align",
            StyleKey::MarginTop => "margin-top",
            StyleKey::MarginBottom => "margin-bottom",
            StyleKey::MarginRight => "margin-right",
            StyleKey::Opacity => "opacity",
            StyleKey::Display => "display",
            StyleKey::Width => "width",
            StyleKey::Height => "height",
            StyleKey::Padding => "padding",
            StyleKey::BackgroundColor => "background-color",
            StyleKey::BorderLeft => "border-left",
            StyleKey::Border => "border",
            StyleKey::BorderRadius => "border-radius",
            StyleKey::BoxShadow => "box-shadow",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            StyleKey::FontSize => "16px",
            StyleKey::FontWeight => "400",
            StyleKey::Color => "#333333",
            StyleKey::LineHeight => "1.6",
            StyleKey::LetterSpacing => "normal",
            StyleKey::TextAlign => "left",
            StyleKey::MarginTop => "0px",
            StyleKey::MarginBottom => "20px",
            StyleKey::MarginRight => "0px",
            StyleKey::Opacity => "1",
            StyleKey::Display => "block",
            StyleKey::Width => "auto",
            StyleKey::Height => "auto",
            StyleKey::Padding => "0px",
            StyleKey::BackgroundColor => "transparent",
            StyleKey::BorderLeft => "none",
            StyleKey::Border => "none",
            StyleKey::BorderRadius => "0px",
            StyleKey::BoxShadow => "none",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        StyleKey::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

/// Sparse style overrides of one block.
///
/// Unknown keys and non-string values are kept verbatim so an untouched
/// document serializes back to the same JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet {
    entries: Map<String, Value>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.set(key, *value);
        }
        set
    }

    /// String value of a vocabulary key. Non-string values read as absent.
    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.get_raw(key.as_str()).and_then(Value::as_str)
    }

    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Stores the value exactly as given.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .insert(name.to_string(), Value::String(value.into()));
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Any truthy value marks the block, as older saves stored it loosely.
    pub fn full_width(&self) -> bool {
        match self.entries.get(FULL_WIDTH) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    pub fn set_full_width(&mut self, full_width: bool) {
        if full_width {
            self.entries.insert(FULL_WIDTH.to_string(), Value::Bool(true));
        } else {
            self.entries.shift_remove(FULL_WIDTH);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

/// Fully resolved style of a block: every vocabulary key has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    values: [String; 19],
}

impl EffectiveStyle {
    pub fn resolve(styles: &StyleSet) -> Self {
        let values = StyleKey::ALL.map(|key| match styles.get(key) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => key.default_value().to_string(),
        });
        Self { values }
    }

    pub fn get(&self, key: StyleKey) -> &str {
        &self.values[key as usize]
    }

    pub fn is_inline_block(&self) -> bool {
        self.get(StyleKey::Display) == "inline-block"
    }

    /// Width of the block container: only inline blocks honour `width`,
    /// everything else spans the row.
    pub fn container_width(&self) -> &str {
        if self.is_inline_block() {
            self.get(StyleKey::Width)
        } else {
            "100%"
        }
    }

    /// Flex justification for image blocks, derived from `textAlign`.
    pub fn image_justify(&self) -> &'static str {
        match self.get(StyleKey::TextAlign) {
            "center" => "center",
            "right" => "flex-end",
            _ => "flex-start",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_default() {
        let resolved = EffectiveStyle::resolve(&StyleSet::new());
        for key in StyleKey::ALL {
            assert_eq!(resolved.get(key), key.default_value());
            assert!(!key.default_value().is_empty());
        }
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in StyleKey::ALL {
            assert_eq!(StyleKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(StyleKey::from_name("paddingLeft"), None);
    }

    #[test]
    fn test_empty_and_non_string_values_fall_back() {
        let mut styles = StyleSet::from_pairs(&[("fontSize", ""), ("color", "#C8102E")]);
        styles
            .entries
            .insert("opacity".to_string(), Value::from(0.5));

        let resolved = EffectiveStyle::resolve(&styles);
        assert_eq!(resolved.get(StyleKey::FontSize), "16px");
        assert_eq!(resolved.get(StyleKey::Color), "#C8102E");
        assert_eq!(resolved.get(StyleKey::Opacity), "1");
    }

    #[test]
    fn test_container_width_rule() {
        let block = EffectiveStyle::resolve(&StyleSet::from_pairs(&[("width", "48%")]));
        assert_eq!(block.container_width(), "100%");

        let inline = EffectiveStyle::resolve(&StyleSet::from_pairs(&[
            ("width", "48%"),
            ("display", "inline-block"),
        ]));
        assert_eq!(inline.container_width(), "48%");

        let inline_auto =
            EffectiveStyle::resolve(&StyleSet::from_pairs(&[("display", "inline-block")]));
        assert_eq!(inline_auto.container_width(), "auto");
    }

    #[test]
    fn test_image_justify() {
        let justify = |align: &str| {
            EffectiveStyle::resolve(&StyleSet::from_pairs(&[("textAlign", align)])).image_justify()
        };
        assert_eq!(justify("center"), "center");
        assert_eq!(justify("right"), "flex-end");
        assert_eq!(justify("left"), "flex-start");
        assert_eq!(justify("justify"), "flex-start");
    }

    #[test]
    fn test_full_width_marker() {
        let mut styles = StyleSet::new();
        assert!(!styles.full_width());
        styles.set_full_width(true);
        assert!(styles.full_width());
        styles.set_full_width(false);
        assert!(styles.is_empty());
    }

    #[test]
    fn test_loose_full_width_values() {
        let styles: StyleSet = serde_json::from_value(serde_json::json!({ "fullWidth": "true" })).unwrap();
        assert!(styles.full_width());
        let styles: StyleSet = serde_json::from_value(serde_json::json!({ "fullWidth": 1 })).unwrap();
        assert!(styles.full_width());
        let styles: StyleSet = serde_json::from_value(serde_json::json!({ "fullWidth": "" })).unwrap();
        assert!(!styles.full_width());
        let styles: StyleSet = serde_json::from_value(serde_json::json!({ "fullWidth": false })).unwrap();
        assert!(!styles.full_width());
    }
}
