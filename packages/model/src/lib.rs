//! # Folio Model
//!
//! The content model shared by the public renderer and the admin editor.
//!
//! ```text
//! SiteDocument ─┬─ "navigation"      → Slot::Navigation
//!               ├─ "company-overview"→ Slot::Blocks(BlockPage)
//!               ├─ "contact"         → Slot::Record
//!               └─ ...
//! ```
//!
//! Style defaulting happens on read: a block may be persisted with a partial
//! [`StyleSet`] and every consumer resolves it through [`EffectiveStyle`].

pub mod block;
pub mod document;
pub mod error;
pub mod navigation;
pub mod style;

pub use block::{validate_block, Block, BlockId, BlockKind};
pub use document::{BlockPage, Diagnostic, SiteDocument, Slot};
pub use error::ModelError;
pub use navigation::{family, layout_hint, page_title, slugify, LayoutHint, NavItem};
pub use style::{EffectiveStyle, StyleKey, StyleSet, FULL_WIDTH};
