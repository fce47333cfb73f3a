//! Editor-side projection of a block into labelled form fields.
//!
//! Field values come from [`EffectiveStyle`], the same resolution the
//! renderer uses, so the form always shows what the page displays.

use folio_model::{Block, BlockId, BlockKind, EffectiveStyle, StyleKey};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum FieldControl {
    Text,
    Color,
    Select { options: &'static [(&'static str, &'static str)] },
    Alignment { options: &'static [&'static str] },
    Range { min: f32, max: f32, step: f32 },
}

const WEIGHTS: &[(&str, &str)] = &[
    ("300", "Light"),
    ("400", "Regular"),
    ("600", "Semi-Bold"),
    ("700", "Bold"),
    ("900", "Black"),
];

const DISPLAY_MODES: &[(&str, &str)] = &[
    ("block", "Full Width (Block)"),
    ("inline-block", "Side-by-Side (Inline-Block)"),
];

const ALIGNMENTS: &[&str] = &["left", "center", "right"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleField {
    #[serde(skip)]
    pub key: StyleKey,
    pub property: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub control: FieldControl,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockForm {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    pub full_width: bool,
    pub fields: Vec<StyleField>,
}

impl BlockForm {
    pub fn for_block(block: &Block) -> Self {
        let style = EffectiveStyle::resolve(&block.styles);
        let field = |key: StyleKey, label: &'static str, control: FieldControl| StyleField {
            key,
            property: key.as_str(),
            label,
            control,
            value: style.get(key).to_string(),
        };

        let mut fields = match block.kind {
            BlockKind::Text => vec![
                field(StyleKey::FontSize, "Font Size", FieldControl::Text),
                field(StyleKey::FontWeight, "Weight", FieldControl::Select { options: WEIGHTS }),
                field(StyleKey::LineHeight, "Line Height", FieldControl::Text),
                field(StyleKey::LetterSpacing, "Spacing", FieldControl::Text),
                field(StyleKey::BackgroundColor, "Background Color", FieldControl::Color),
                field(StyleKey::Padding, "Padding", FieldControl::Text),
                field(StyleKey::BorderLeft, "Border Left (Accent)", FieldControl::Text),
                field(StyleKey::Color, "Color", FieldControl::Color),
                field(StyleKey::TextAlign, "Alignment", FieldControl::Alignment { options: ALIGNMENTS }),
            ],
            BlockKind::Image => {
                let mut image = vec![
                    field(StyleKey::Width, "Width", FieldControl::Text),
                    field(StyleKey::BorderRadius, "Radius", FieldControl::Text),
                    field(StyleKey::Border, "Border", FieldControl::Text),
                    field(StyleKey::BoxShadow, "Shadow", FieldControl::Text),
                    field(StyleKey::Display, "Display Mode", FieldControl::Select { options: DISPLAY_MODES }),
                ];
                // Right margin only matters between inline tiles
                if style.is_inline_block() {
                    image.push(field(StyleKey::MarginRight, "Right Margin", FieldControl::Text));
                }
                image
            }
        };

        fields.extend([
            field(StyleKey::MarginTop, "Margin Top", FieldControl::Text),
            field(StyleKey::MarginBottom, "Margin Bottom", FieldControl::Text),
            field(
                StyleKey::Opacity,
                "Opacity (0-1)",
                FieldControl::Range {
                    min: 0.0,
                    max: 1.0,
                    step: 0.1,
                },
            ),
        ]);

        Self {
            id: block.id.clone(),
            kind: block.kind,
            content: block.content.clone(),
            full_width: block.styles.full_width(),
            fields,
        }
    }

    pub fn field(&self, key: StyleKey) -> Option<&StyleField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Displayed value of a field, if the form shows it
    pub fn value(&self, key: StyleKey) -> Option<&str> {
        self.field(key).map(|f| f.value.as_str())
    }
}
