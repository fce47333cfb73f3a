//! Style sets given to blocks the editor creates.

use folio_model::{Block, BlockId, BlockKind, StyleSet};

pub const NEW_TEXT_CONTENT: &str = "New Text Block";
pub const NEW_IMAGE_CONTENT: &str = "https://picsum.photos/800/400";

pub fn text_styles() -> StyleSet {
    StyleSet::from_pairs(&[
        ("fontSize", "16px"),
        ("fontWeight", "400"),
        ("color", "#333333"),
        ("textAlign", "left"),
        ("marginTop", "0px"),
        ("marginBottom", "20px"),
    ])
}

pub fn image_styles() -> StyleSet {
    StyleSet::from_pairs(&[
        ("width", "100%"),
        ("height", "auto"),
        ("marginTop", "0px"),
        ("marginBottom", "20px"),
        ("borderRadius", "0px"),
    ])
}

/// Fresh block of the given kind with the editor's default content and styles
pub fn new_block(id: BlockId, kind: BlockKind) -> Block {
    match kind {
        BlockKind::Text => Block::new(id, kind, NEW_TEXT_CONTENT, text_styles()),
        BlockKind::Image => Block::new(id, kind, NEW_IMAGE_CONTENT, image_styles()),
    }
}

/// Heading and sub-heading for a page that has no blocks yet
pub fn starter_blocks(heading: BlockId, subheading: BlockId) -> Vec<Block> {
    vec![
        Block::new(
            heading,
            BlockKind::Text,
            "Welcome to the new page!",
            StyleSet::from_pairs(&[
                ("fontSize", "32px"),
                ("fontWeight", "700"),
                ("color", "#1a202c"),
                ("textAlign", "center"),
                ("marginTop", "40px"),
                ("marginBottom", "20px"),
            ]),
        ),
        Block::new(
            subheading,
            BlockKind::Text,
            "Start adding your content here.",
            StyleSet::from_pairs(&[
                ("fontSize", "18px"),
                ("fontWeight", "400"),
                ("color", "#4a5568"),
                ("textAlign", "center"),
                ("marginTop", "0px"),
                ("marginBottom", "40px"),
            ]),
        ),
    ]
}

pub(crate) fn hero_image_styles() -> StyleSet {
    StyleSet::from_pairs(&[("width", "100%"), ("height", "500px"), ("marginBottom", "20px")])
}

pub(crate) fn hero_title_styles() -> StyleSet {
    StyleSet::from_pairs(&[
        ("fontSize", "32px"),
        ("fontWeight", "700"),
        ("textAlign", "center"),
        ("marginBottom", "40px"),
    ])
}
