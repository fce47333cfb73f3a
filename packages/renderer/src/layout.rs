//! Block sequence → sections.
//!
//! Every page renders as one full-width flow, except pages carrying
//! [`LayoutHint::SideBySide`]: there the first image block is paired with the
//! blocks that follow it, up to the first block marked `fullWidth`.

use crate::vdom::VNode;
use folio_model::{Block, BlockId, BlockKind, EffectiveStyle, LayoutHint, StyleKey};

/// Shown in place of an image that fails to load
pub const IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/400x200?text=Invalid+Image+URL";

/// A block with its resolved style
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock<'a> {
    pub block: &'a Block,
    pub style: EffectiveStyle,
    /// First block of the paired text column; its top margin is dropped
    pub leads_column: bool,
}

impl<'a> RenderedBlock<'a> {
    pub fn new(block: &'a Block) -> Self {
        Self {
            block,
            style: EffectiveStyle::resolve(&block.styles),
            leads_column: false,
        }
    }

    fn leading(block: &'a Block) -> Self {
        Self {
            leads_column: true,
            ..Self::new(block)
        }
    }

    /// Declarations of the outer block container
    pub fn container_declarations(&self) -> Vec<(&'static str, String)> {
        let s = &self.style;
        let margin_top = if self.leads_column {
            "0px"
        } else {
            s.get(StyleKey::MarginTop)
        };

        vec![
            ("margin-top", margin_top.to_string()),
            ("margin-bottom", s.get(StyleKey::MarginBottom).to_string()),
            ("text-align", s.get(StyleKey::TextAlign).to_string()),
            ("opacity", s.get(StyleKey::Opacity).to_string()),
            ("display", s.get(StyleKey::Display).to_string()),
            ("width", s.container_width().to_string()),
            ("margin-right", s.get(StyleKey::MarginRight).to_string()),
            ("padding", s.get(StyleKey::Padding).to_string()),
            ("background-color", s.get(StyleKey::BackgroundColor).to_string()),
            ("border-left", s.get(StyleKey::BorderLeft).to_string()),
            ("border", s.get(StyleKey::Border).to_string()),
            ("border-radius", s.get(StyleKey::BorderRadius).to_string()),
        ]
    }

    /// Declarations of the inner `<p>` or `<img>`
    pub fn content_declarations(&self) -> Vec<(&'static str, String)> {
        let s = &self.style;
        let keyed = |key: StyleKey| (key.css_property(), s.get(key).to_string());

        match self.block.kind {
            BlockKind::Text => vec![
                keyed(StyleKey::FontSize),
                keyed(StyleKey::FontWeight),
                keyed(StyleKey::Color),
                keyed(StyleKey::LineHeight),
                keyed(StyleKey::LetterSpacing),
                ("white-space", "pre-wrap".to_string()),
            ],
            BlockKind::Image => vec![
                ("width", "100%".to_string()),
                keyed(StyleKey::Height),
                keyed(StyleKey::BorderRadius),
                keyed(StyleKey::Border),
                keyed(StyleKey::BoxShadow),
                ("object-fit", "cover".to_string()),
            ],
        }
    }

    pub fn to_vnode(&self) -> VNode {
        let content = match self.block.kind {
            BlockKind::Text => VNode::element("p")
                .with_styles(self.content_declarations())
                .with_child(VNode::text(self.block.content.as_str())),
            BlockKind::Image => VNode::element("div")
                .with_class("folio-image")
                .with_style("display", "flex")
                .with_style("height", "100%")
                .with_style("justify-content", self.style.image_justify())
                .with_child(
                    VNode::element("img")
                        .with_attr("src", self.block.content.as_str())
                        .with_attr("alt", "Page content")
                        .with_attr("referrerpolicy", "no-referrer")
                        .with_attr(
                            "onerror",
                            format!("this.onerror=null;this.src='{}'", IMAGE_PLACEHOLDER),
                        )
                        .with_styles(self.content_declarations()),
                ),
        };

        VNode::element("div")
            .with_class(format!("folio-block folio-block--{}", self.block.kind.as_str()))
            .with_attr("data-block-id", self.block.id.to_string())
            .with_styles(self.container_declarations())
            .with_child(content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    /// Blocks flowing across the full content width
    FullWidth(Vec<RenderedBlock<'a>>),
    /// Image on the left, text column on the right
    Paired {
        image: RenderedBlock<'a>,
        column: Vec<RenderedBlock<'a>>,
    },
}

impl<'a> Section<'a> {
    pub fn blocks(&self) -> Vec<&'a Block> {
        match self {
            Section::FullWidth(blocks) => blocks.iter().map(|r| r.block).collect(),
            Section::Paired { image, column } => std::iter::once(image)
                .chain(column.iter())
                .map(|r| r.block)
                .collect(),
        }
    }

    pub fn to_vnode(&self) -> VNode {
        match self {
            Section::FullWidth(blocks) => VNode::element("div")
                .with_class("folio-flow")
                .with_children(blocks.iter().map(RenderedBlock::to_vnode)),
            Section::Paired { image, column } => VNode::element("div")
                .with_class("folio-pair")
                .with_child(
                    VNode::element("div")
                        .with_class("folio-pair__media")
                        .with_child(image.to_vnode()),
                )
                .with_child(
                    VNode::element("div")
                        .with_class("folio-pair__column")
                        .with_children(column.iter().map(RenderedBlock::to_vnode)),
                ),
        }
    }
}

/// Rendered page body
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<'a> {
    pub sections: Vec<Section<'a>>,
}

impl<'a> Layout<'a> {
    pub fn to_vnodes(&self) -> Vec<VNode> {
        self.sections.iter().map(Section::to_vnode).collect()
    }

    /// Block ids in visual order
    pub fn block_order(&self) -> Vec<&'a BlockId> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks())
            .map(|b| &b.id)
            .collect()
    }
}

/// Lay out a block sequence.
pub fn render(blocks: &[Block], hint: LayoutHint) -> Layout<'_> {
    let first_image = match hint {
        LayoutHint::SideBySide => blocks.iter().position(Block::is_image),
        LayoutHint::Flow => None,
    };

    let Some(split) = first_image else {
        return Layout {
            sections: vec![Section::FullWidth(
                blocks.iter().map(RenderedBlock::new).collect(),
            )],
        };
    };

    let before = &blocks[..split];
    let rest = &blocks[split + 1..];
    let end = rest
        .iter()
        .position(|b| b.styles.full_width())
        .unwrap_or(rest.len());

    let mut sections = Vec::with_capacity(3);
    if !before.is_empty() {
        sections.push(Section::FullWidth(
            before.iter().map(RenderedBlock::new).collect(),
        ));
    }

    let column = rest[..end]
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if i == 0 {
                RenderedBlock::leading(b)
            } else {
                RenderedBlock::new(b)
            }
        })
        .collect();
    sections.push(Section::Paired {
        image: RenderedBlock::new(&blocks[split]),
        column,
    });

    if end < rest.len() {
        sections.push(Section::FullWidth(
            rest[end..].iter().map(RenderedBlock::new).collect(),
        ));
    }

    tracing::trace!(blocks = blocks.len(), sections = sections.len(), "Rendered side-by-side layout");
    Layout { sections }
}
