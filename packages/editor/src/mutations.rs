//! # Block Mutations
//!
//! Semantic operations on the block pages of a site document.
//!
//! ## Mutation Semantics
//!
//! - Every mutation addresses exactly one page slot and leaves every other
//!   slot untouched.
//! - `validate` runs before anything is written, so a failed mutation leaves
//!   the document as it was.
//! - Adding to a page that does not exist yet creates it. Adding to a legacy
//!   record page turns it into a block page and keeps its fields.
//! - Moving the first block up or the last block down is a no-op.
//! - A reorder must name every block of the page exactly once.
//! - Applying a template over existing blocks needs `replace_existing`.

use crate::defaults;
use crate::ids::IdGenerator;
use crate::templates::find_template;
use folio_model::{Block, BlockId, BlockKind, BlockPage, SiteDocument, Slot, FULL_WIDTH};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Append a block with the default content and styles for its kind
    AddBlock { page: String, kind: BlockKind },

    RemoveBlock { page: String, id: BlockId },

    /// Swap a block with its neighbour
    MoveBlock {
        page: String,
        id: BlockId,
        direction: Direction,
    },

    /// Put the page's blocks in the given order
    ReorderBlocks { page: String, order: Vec<BlockId> },

    /// Set one style key; the value is stored as given
    SetStyle {
        page: String,
        id: BlockId,
        property: String,
        value: String,
    },

    /// Toggle the marker that ends a side-by-side column
    SetFullWidth {
        page: String,
        id: BlockId,
        full_width: bool,
    },

    UpdateContent {
        page: String,
        id: BlockId,
        content: String,
    },

    /// Replace the whole block sequence with a fresh copy of a template
    ApplyTemplate {
        page: String,
        template: String,
        #[serde(default)]
        replace_existing: bool,
    },

    /// Give an empty page a heading and a sub-heading
    InitializeDefaults { page: String },

    /// Turn a legacy `hero` page into a two-block page
    ConvertToBlocks { page: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Block {id} not found on page {page}")]
    BlockNotFound { page: String, id: BlockId },

    #[error("Page {0} cannot hold blocks")]
    NotABlockPage(String),

    #[error("Reorder must list every block of the page exactly once")]
    NotAPermutation,

    #[error("Page {0} already has blocks; confirm to replace them")]
    ConfirmationRequired(String),

    #[error("Page {0} already has blocks")]
    PageNotEmpty(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Page {0} is already block based")]
    AlreadyBlockPage(String),

    #[error("Page {0} has no hero image and title to convert")]
    MissingLegacyContent(String),
}

impl Mutation {
    /// Page slot this mutation addresses
    pub fn page(&self) -> &str {
        match self {
            Mutation::AddBlock { page, .. }
            | Mutation::RemoveBlock { page, .. }
            | Mutation::MoveBlock { page, .. }
            | Mutation::ReorderBlocks { page, .. }
            | Mutation::SetStyle { page, .. }
            | Mutation::SetFullWidth { page, .. }
            | Mutation::UpdateContent { page, .. }
            | Mutation::ApplyTemplate { page, .. }
            | Mutation::InitializeDefaults { page }
            | Mutation::ConvertToBlocks { page } => page,
        }
    }

    /// Apply to the document with validation.
    ///
    /// Returns the ids of blocks created by the mutation.
    pub fn apply(
        &self,
        doc: &mut SiteDocument,
        ids: &mut IdGenerator,
    ) -> Result<Vec<BlockId>, MutationError> {
        // Validate first
        self.validate(doc)?;

        let created = match self {
            Mutation::AddBlock { page, kind } => {
                let target = Self::writable_page(doc, page)?;
                let block = defaults::new_block(ids.next_for(target), *kind);
                let id = block.id.clone();
                target.blocks.push(block);
                vec![id]
            }

            Mutation::RemoveBlock { page, id } => {
                let target = Self::existing_page(doc, page)?;
                let index = Self::locate(target, page, id)?;
                target.blocks.remove(index);
                Vec::new()
            }

            Mutation::MoveBlock {
                page,
                id,
                direction,
            } => {
                let target = Self::existing_page(doc, page)?;
                let index = Self::locate(target, page, id)?;
                let neighbour = match direction {
                    Direction::Up => index.checked_sub(1),
                    Direction::Down => Some(index + 1).filter(|&i| i < target.blocks.len()),
                };
                if let Some(neighbour) = neighbour {
                    target.blocks.swap(index, neighbour);
                }
                Vec::new()
            }

            Mutation::ReorderBlocks { page, order } => {
                let target = Self::existing_page(doc, page)?;
                let mut remaining = std::mem::take(&mut target.blocks);
                for id in order {
                    if let Some(index) = remaining.iter().position(|b| &b.id == id) {
                        target.blocks.push(remaining.remove(index));
                    }
                }
                Vec::new()
            }

            Mutation::SetStyle {
                page,
                id,
                property,
                value,
            } => {
                let styles = &mut Self::existing_block(doc, page, id)?.styles;
                if property == FULL_WIDTH {
                    styles.set_full_width(!matches!(value.trim(), "" | "false" | "0"));
                } else {
                    styles.set(property, value.clone());
                }
                Vec::new()
            }

            Mutation::SetFullWidth {
                page,
                id,
                full_width,
            } => {
                Self::existing_block(doc, page, id)?
                    .styles
                    .set_full_width(*full_width);
                Vec::new()
            }

            Mutation::UpdateContent { page, id, content } => {
                Self::existing_block(doc, page, id)?.content = content.clone();
                Vec::new()
            }

            Mutation::ApplyTemplate { page, template, .. } => {
                let blueprint = find_template(template)
                    .ok_or_else(|| MutationError::UnknownTemplate(template.clone()))?;
                let target = Self::writable_page(doc, page)?;
                let blocks = blueprint.instantiate(target, ids);
                target.replace_blocks(blocks);
                target.ids()
            }

            Mutation::InitializeDefaults { page } => {
                let target = Self::writable_page(doc, page)?;
                let heading = ids.next_for(target);
                let subheading = ids.next_for(target);
                target.replace_blocks(defaults::starter_blocks(heading, subheading));
                target.ids()
            }

            Mutation::ConvertToBlocks { page } => {
                let (image, title) = match doc.slot(page) {
                    Some(slot) => Self::legacy_hero(slot, page)?,
                    None => return Err(MutationError::PageNotFound(page.clone())),
                };
                let target = Self::writable_page(doc, page)?;
                let image_id = ids.next_for(target);
                let title_id = ids.next_for(target);
                target.replace_blocks(vec![
                    Block::new(image_id, BlockKind::Image, image, defaults::hero_image_styles()),
                    Block::new(title_id, BlockKind::Text, title, defaults::hero_title_styles()),
                ]);
                target.ids()
            }
        };

        tracing::debug!(page = self.page(), created = created.len(), "Applied mutation");
        Ok(created)
    }

    /// Validate without applying
    pub fn validate(&self, doc: &SiteDocument) -> Result<(), MutationError> {
        match self {
            Mutation::AddBlock { page, .. } => Self::check_writable(doc, page),

            Mutation::RemoveBlock { page, id }
            | Mutation::MoveBlock { page, id, .. }
            | Mutation::SetStyle { page, id, .. }
            | Mutation::SetFullWidth { page, id, .. }
            | Mutation::UpdateContent { page, id, .. } => {
                let target = Self::existing_page_ref(doc, page)?;
                if target.contains(id) {
                    Ok(())
                } else {
                    Err(MutationError::BlockNotFound {
                        page: page.clone(),
                        id: id.clone(),
                    })
                }
            }

            Mutation::ReorderBlocks { page, order } => {
                let target = Self::existing_page_ref(doc, page)?;
                if is_permutation(&target.ids(), order) {
                    Ok(())
                } else {
                    Err(MutationError::NotAPermutation)
                }
            }

            Mutation::ApplyTemplate {
                page,
                template,
                replace_existing,
            } => {
                if find_template(template).is_none() {
                    return Err(MutationError::UnknownTemplate(template.clone()));
                }
                Self::check_writable(doc, page)?;
                let has_blocks = doc.block_page(page).is_some_and(|p| !p.has_no_entries());
                if has_blocks && !replace_existing {
                    return Err(MutationError::ConfirmationRequired(page.clone()));
                }
                Ok(())
            }

            Mutation::InitializeDefaults { page } => {
                Self::check_writable(doc, page)?;
                if doc.block_page(page).is_some_and(|p| !p.has_no_entries()) {
                    return Err(MutationError::PageNotEmpty(page.clone()));
                }
                Ok(())
            }

            Mutation::ConvertToBlocks { page } => match doc.slot(page) {
                Some(slot) => Self::legacy_hero(slot, page).map(|_| ()),
                None => Err(MutationError::PageNotFound(page.clone())),
            },
        }
    }

    /// Missing slots and records can receive blocks, other values cannot
    fn check_writable(doc: &SiteDocument, page: &str) -> Result<(), MutationError> {
        match doc.slot(page) {
            None | Some(Slot::Blocks(_)) | Some(Slot::Record(_)) => Ok(()),
            Some(_) => Err(MutationError::NotABlockPage(page.to_string())),
        }
    }

    /// Block page for `page`, creating or converting the slot when needed
    fn writable_page<'d>(
        doc: &'d mut SiteDocument,
        page: &str,
    ) -> Result<&'d mut BlockPage, MutationError> {
        let replacement = match doc.slot(page) {
            None => Some(BlockPage::default()),
            Some(Slot::Record(fields)) => Some(BlockPage::from_record(fields.clone(), Vec::new())),
            Some(Slot::Blocks(_)) => None,
            Some(_) => return Err(MutationError::NotABlockPage(page.to_string())),
        };
        if let Some(created) = replacement {
            tracing::debug!(page, "Creating block page");
            doc.insert(page, Slot::Blocks(created));
        }
        doc.block_page_mut(page)
            .ok_or_else(|| MutationError::NotABlockPage(page.to_string()))
    }

    fn existing_page_ref<'d>(doc: &'d SiteDocument, page: &str) -> Result<&'d BlockPage, MutationError> {
        match doc.slot(page) {
            Some(Slot::Blocks(target)) => Ok(target),
            Some(_) => Err(MutationError::NotABlockPage(page.to_string())),
            None => Err(MutationError::PageNotFound(page.to_string())),
        }
    }

    fn existing_page<'d>(
        doc: &'d mut SiteDocument,
        page: &str,
    ) -> Result<&'d mut BlockPage, MutationError> {
        Self::existing_page_ref(doc, page)?;
        doc.block_page_mut(page)
            .ok_or_else(|| MutationError::PageNotFound(page.to_string()))
    }

    fn existing_block<'d>(
        doc: &'d mut SiteDocument,
        page: &str,
        id: &BlockId,
    ) -> Result<&'d mut Block, MutationError> {
        Self::existing_page(doc, page)?
            .find_mut(id)
            .ok_or_else(|| MutationError::BlockNotFound {
                page: page.to_string(),
                id: id.clone(),
            })
    }

    fn locate(target: &BlockPage, page: &str, id: &BlockId) -> Result<usize, MutationError> {
        target.position(id).ok_or_else(|| MutationError::BlockNotFound {
            page: page.to_string(),
            id: id.clone(),
        })
    }

    /// `hero.image` and `hero.title` of a legacy page
    fn legacy_hero(slot: &Slot, page: &str) -> Result<(String, String), MutationError> {
        let fields: &Map<String, Value> = match slot {
            Slot::Record(fields) => fields,
            Slot::Blocks(target) if target.has_no_entries() => target.fields(),
            Slot::Blocks(_) => return Err(MutationError::AlreadyBlockPage(page.to_string())),
            _ => return Err(MutationError::NotABlockPage(page.to_string())),
        };

        let hero = fields.get("hero");
        let text = |name: &str| {
            hero.and_then(|h| h.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        match (text("image"), text("title")) {
            (Some(image), Some(title)) => Ok((image, title)),
            _ => Err(MutationError::MissingLegacyContent(page.to_string())),
        }
    }
}

fn is_permutation(current: &[BlockId], order: &[BlockId]) -> bool {
    if current.len() != order.len() {
        return false;
    }
    let wanted: HashSet<&BlockId> = order.iter().collect();
    wanted.len() == order.len() && current.iter().all(|id| wanted.contains(id))
}

/// Result of applying a mutation in a session
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Working copy version after the mutation
    pub version: u64,

    /// Ids of blocks the mutation created
    pub created: Vec<BlockId>,
}
