use super::open_host_for_writing;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use folio_editor::{Direction, EditSession, EditorError, Mutation, MutationError};
use folio_model::{BlockId, BlockKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Site document file (overrides config)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub action: EditAction,
}

#[derive(Debug, Subcommand)]
pub enum EditAction {
    /// Give an empty page a heading and a sub-heading
    Init { page: String },

    /// Append a block with default content and styles
    Add {
        page: String,
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// Delete a block
    Remove { page: String, id: String },

    /// Swap a block with its neighbour
    Move {
        page: String,
        id: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },

    /// Put the page's blocks in the given order
    Reorder {
        page: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Set one style property, e.g. `style about 2 textAlign center`
    Style {
        page: String,
        id: String,
        property: String,
        value: String,
    },

    /// Replace a block's text or image URL
    Content {
        page: String,
        id: String,
        content: String,
    },

    /// Mark a block as full width, ending a side-by-side column
    Fullwidth {
        page: String,
        id: String,
        /// Clear the marker instead
        #[arg(long)]
        off: bool,
    },

    /// Replace the page's blocks with a template
    Template {
        page: String,
        name: String,
        /// Replace existing blocks without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Turn a legacy hero page into blocks
    Convert { page: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl EditAction {
    pub fn into_mutation(self) -> Mutation {
        match self {
            EditAction::Init { page } => Mutation::InitializeDefaults { page },
            EditAction::Add { page, kind } => Mutation::AddBlock {
                page,
                kind: match kind {
                    KindArg::Text => BlockKind::Text,
                    KindArg::Image => BlockKind::Image,
                },
            },
            EditAction::Remove { page, id } => Mutation::RemoveBlock {
                page,
                id: BlockId::parse(&id),
            },
            EditAction::Move {
                page,
                id,
                direction,
            } => Mutation::MoveBlock {
                page,
                id: BlockId::parse(&id),
                direction: match direction {
                    DirectionArg::Up => Direction::Up,
                    DirectionArg::Down => Direction::Down,
                },
            },
            EditAction::Reorder { page, ids } => Mutation::ReorderBlocks {
                page,
                order: ids.iter().map(|id| BlockId::parse(id)).collect(),
            },
            EditAction::Style {
                page,
                id,
                property,
                value,
            } => Mutation::SetStyle {
                page,
                id: BlockId::parse(&id),
                property,
                value,
            },
            EditAction::Content { page, id, content } => Mutation::UpdateContent {
                page,
                id: BlockId::parse(&id),
                content,
            },
            EditAction::Fullwidth { page, id, off } => Mutation::SetFullWidth {
                page,
                id: BlockId::parse(&id),
                full_width: !off,
            },
            EditAction::Template { page, name, yes } => Mutation::ApplyTemplate {
                page,
                template: name,
                replace_existing: yes,
            },
            EditAction::Convert { page } => Mutation::ConvertToBlocks { page },
        }
    }
}

pub async fn edit(args: EditArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let data_file = config.data_file(cwd, args.data.as_deref());
    let host = open_host_for_writing(&data_file, config.read_only).await?;

    let mut session = EditSession::open("cli", &host);
    let mutation = args.action.into_mutation();
    let page = mutation.page().to_string();
    tracing::debug!(?mutation, "Applying mutation");

    let result = match session.apply(mutation) {
        Ok(result) => result,
        Err(e @ EditorError::Mutation(MutationError::ConfirmationRequired(_))) => {
            println!("Use --yes to replace the existing blocks");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    session.save(&host).await?;

    println!(
        "  {} Updated {} → {}",
        "✓".green(),
        page.bright_white(),
        data_file.display()
    );
    for id in &result.created {
        println!("    + block {}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::{json, Value};

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(subcommand)]
        action: EditAction,
    }

    fn mutation(args: &[&str]) -> Mutation {
        let argv = std::iter::once("edit").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().action.into_mutation()
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            mutation(&["add", "news", "image"]),
            Mutation::AddBlock {
                page: "news".to_string(),
                kind: BlockKind::Image,
            }
        );
        assert_eq!(
            mutation(&["move", "news", "3", "up"]),
            Mutation::MoveBlock {
                page: "news".to_string(),
                id: BlockId::int(3),
                direction: Direction::Up,
            }
        );
        assert_eq!(
            mutation(&["reorder", "news", "3", "1", "2"]),
            Mutation::ReorderBlocks {
                page: "news".to_string(),
                order: vec![BlockId::int(3), BlockId::int(1), BlockId::int(2)],
            }
        );
        assert_eq!(
            mutation(&["fullwidth", "news", "2", "--off"]),
            Mutation::SetFullWidth {
                page: "news".to_string(),
                id: BlockId::int(2),
                full_width: false,
            }
        );
        assert_eq!(
            mutation(&["template", "home", "Home Style", "--yes"]),
            Mutation::ApplyTemplate {
                page: "home".to_string(),
                template: "Home Style".to_string(),
                replace_existing: true,
            }
        );
    }

    #[test]
    fn test_reorder_needs_ids() {
        let argv = ["edit", "reorder", "news"];
        assert!(Harness::try_parse_from(argv).is_err());
    }

    fn read(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_edit_saves_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(
            &path,
            json!({ "news": { "blocks": [
                { "id": 1, "type": "text", "content": "Hi", "styles": {} }
            ]}})
            .to_string(),
        )
        .unwrap();

        let args = EditArgs {
            data: Some(path.clone()),
            action: EditAction::Style {
                page: "news".to_string(),
                id: "1".to_string(),
                property: "textAlign".to_string(),
                value: "center".to_string(),
            },
        };
        edit(args, dir.path()).await.unwrap();

        assert_eq!(
            read(&path)["news"]["blocks"][0]["styles"]["textAlign"],
            "center"
        );
    }

    #[tokio::test]
    async fn test_template_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let original = json!({ "news": { "blocks": [
            { "id": 1, "type": "text", "content": "Hi", "styles": {} }
        ]}});
        std::fs::write(&path, original.to_string()).unwrap();

        let args = EditArgs {
            data: Some(path.clone()),
            action: EditAction::Template {
                page: "news".to_string(),
                name: "Standard".to_string(),
                yes: false,
            },
        };
        assert!(edit(args, dir.path()).await.is_err());
        assert_eq!(read(&path), original);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let corrupt = r#"{ "news": { "blocks": [ ] }, oops"#;
        std::fs::write(&path, corrupt).unwrap();

        let args = EditArgs {
            data: Some(path.clone()),
            action: EditAction::Add {
                page: "news".to_string(),
                kind: KindArg::Text,
            },
        };
        let error = edit(args, dir.path()).await.unwrap_err();
        assert!(error.to_string().starts_with("Failed to load"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);
    }

    #[tokio::test]
    async fn test_edit_keeps_other_pages_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let about = json!([
            { "id": 7, "type": "text", "content": "no styles" },
            { "id": 8, "type": "text", "content": "kept", "styles": {}, "alt": "extra" },
            { "id": 9, "type": "video", "content": "clip.mp4", "styles": {} }
        ]);
        std::fs::write(
            &path,
            json!({
                "about": { "blocks": about.clone() },
                "news": { "blocks": [
                    { "id": 1, "type": "text", "content": "Hi", "styles": {} }
                ]}
            })
            .to_string(),
        )
        .unwrap();

        let args = EditArgs {
            data: Some(path.clone()),
            action: EditAction::Style {
                page: "news".to_string(),
                id: "1".to_string(),
                property: "textAlign".to_string(),
                value: "center".to_string(),
            },
        };
        edit(args, dir.path()).await.unwrap();

        let saved = read(&path);
        assert_eq!(saved["about"]["blocks"], about);
        assert_eq!(saved["news"]["blocks"][0]["styles"]["textAlign"], "center");
    }
}
