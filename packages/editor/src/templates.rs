//! Built-in page templates.
//!
//! The catalog is fixed at compile time. Applying a template copies its
//! blueprint blocks into a page under freshly minted ids.

use crate::ids::IdGenerator;
use folio_model::{slugify, Block, BlockKind, BlockPage, StyleSet};
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    pub styles: StyleSet,
}

impl TemplateBlock {
    fn new(kind: BlockKind, content: &str, styles: &[(&str, &str)]) -> Self {
        Self {
            kind,
            content: content.to_string(),
            styles: StyleSet::from_pairs(styles),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub name: String,
    #[serde(rename = "previewImageURL")]
    pub preview_image_url: String,
    pub description: String,
    pub blocks: Vec<TemplateBlock>,
}

impl Template {
    /// Blocks for `page`, each with a new id and its own copy of the styles.
    pub fn instantiate(&self, page: &BlockPage, ids: &mut IdGenerator) -> Vec<Block> {
        self.blocks
            .iter()
            .map(|blueprint| {
                Block::new(
                    ids.next_for(page),
                    blueprint.kind,
                    blueprint.content.clone(),
                    blueprint.styles.clone(),
                )
            })
            .collect()
    }
}

static CATALOG: OnceLock<Vec<Template>> = OnceLock::new();

pub fn catalog() -> &'static [Template] {
    CATALOG.get_or_init(build_catalog)
}

/// Look a template up by display name or by its slug (`home-style`)
pub fn find_template(name: &str) -> Option<&'static Template> {
    catalog()
        .iter()
        .find(|t| t.name == name || slugify(&t.name) == name)
}

fn build_catalog() -> Vec<Template> {
    use BlockKind::{Image, Text};

    let tile = [
        ("width", "32%"),
        ("borderRadius", "4px"),
        ("display", "inline-block"),
        ("marginRight", "1%"),
    ];

    vec![
        Template {
            name: "Standard".to_string(),
            preview_image_url: "https://picsum.photos/seed/std/400/300".to_string(),
            description: "Clean layout with title, image, and text.".to_string(),
            blocks: vec![
                TemplateBlock::new(
                    Text,
                    "Page Title",
                    &[
                        ("fontSize", "36px"),
                        ("fontWeight", "700"),
                        ("textAlign", "center"),
                        ("marginBottom", "40px"),
                    ],
                ),
                TemplateBlock::new(
                    Image,
                    "https://picsum.photos/1200/600",
                    &[("width", "100%"), ("borderRadius", "12px"), ("marginBottom", "40px")],
                ),
                TemplateBlock::new(
                    Text,
                    "Add your content here...",
                    &[("fontSize", "18px"), ("fontWeight", "400"), ("textAlign", "left")],
                ),
            ],
        },
        Template {
            name: "Home Style".to_string(),
            preview_image_url: "https://picsum.photos/seed/home/400/300".to_string(),
            description: "Dynamic home page with hero and grid layout.".to_string(),
            blocks: vec![
                TemplateBlock::new(
                    Image,
                    "https://picsum.photos/1920/600",
                    &[("width", "100%"), ("height", "500px"), ("marginBottom", "20px")],
                ),
                TemplateBlock::new(
                    Text,
                    "Welcome to CK Corporation",
                    &[
                        ("fontSize", "24px"),
                        ("fontWeight", "700"),
                        ("textAlign", "center"),
                        ("color", "#C8102E"),
                        ("border", "1px solid #eee"),
                        ("padding", "20px"),
                        ("backgroundColor", "#f9f9f9"),
                    ],
                ),
                TemplateBlock::new(
                    Text,
                    "Our Solutions",
                    &[
                        ("fontSize", "28px"),
                        ("fontWeight", "700"),
                        ("textAlign", "left"),
                        ("borderLeft", "4px solid #C8102E"),
                        ("paddingLeft", "16px"),
                        ("marginTop", "40px"),
                        ("marginBottom", "20px"),
                    ],
                ),
                TemplateBlock::new(Image, "https://picsum.photos/400/300", &tile),
                TemplateBlock::new(Image, "https://picsum.photos/400/300", &tile),
                TemplateBlock::new(Image, "https://picsum.photos/400/300", &tile[..3]),
            ],
        },
        Template {
            name: "Split Layout".to_string(),
            preview_image_url: "https://picsum.photos/seed/split/400/300".to_string(),
            description: "Modern 50/50 split of image and text.".to_string(),
            blocks: vec![
                TemplateBlock::new(
                    Image,
                    "https://picsum.photos/600/600",
                    &[
                        ("width", "48%"),
                        ("borderRadius", "12px"),
                        ("display", "inline-block"),
                        ("marginRight", "4%"),
                    ],
                ),
                TemplateBlock::new(
                    Text,
                    "Section Title\n\nDetailed description goes here. This layout is great for highlighting features with accompanying visuals.",
                    &[
                        ("width", "48%"),
                        ("fontSize", "18px"),
                        ("fontWeight", "400"),
                        ("display", "inline-block"),
                        ("textAlign", "left"),
                        ("marginTop", "40px"),
                    ],
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{BlockId, StyleKey};

    #[test]
    fn test_catalog_names() {
        let names: Vec<&str> = catalog().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Standard", "Home Style", "Split Layout"]);
    }

    #[test]
    fn test_find_by_slug() {
        assert_eq!(find_template("home-style").map(|t| t.blocks.len()), Some(6));
        assert_eq!(find_template("Split Layout").map(|t| t.blocks.len()), Some(2));
        assert!(find_template("Gallery").is_none());
    }

    #[test]
    fn test_last_tile_has_no_right_margin() {
        let home = find_template("Home Style").unwrap();
        assert_eq!(home.blocks[4].styles.get(StyleKey::MarginRight), Some("1%"));
        assert_eq!(home.blocks[5].styles.get(StyleKey::MarginRight), None);
    }

    #[test]
    fn test_instantiate_copies_styles() {
        let standard = find_template("Standard").unwrap();
        let mut ids = IdGenerator::starting_at(10);
        let mut blocks = standard.instantiate(&BlockPage::default(), &mut ids);

        assert_eq!(
            blocks.iter().map(|b| b.id.clone()).collect::<Vec<_>>(),
            vec![BlockId::int(10), BlockId::int(11), BlockId::int(12)]
        );

        blocks[0].styles.set("fontSize", "99px");
        assert_eq!(standard.blocks[0].styles.get(StyleKey::FontSize), Some("36px"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(&catalog()[0]).unwrap();
        assert_eq!(json["previewImageURL"], "https://picsum.photos/seed/std/400/300");
        assert_eq!(json["blocks"][1]["type"], "image");
    }
}
