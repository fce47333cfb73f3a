//! # Folio Editor
//!
//! Editing engine for the block pages of a site document.
//!
//! ```text
//! SiteHost ──current()──▶ EditSession ──apply(Mutation)──▶ working copy
//!     ▲                                                        │
//!     └──────────────────────── save() ─────────────────────────┘
//! ```
//!
//! Mutations are validated before they touch the document, so a rejected
//! mutation never leaves a page half-edited. Saving sends the whole working
//! copy; there are no partial updates and no merging with concurrent edits.
//!
//! ```rust,ignore
//! use folio_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::open("admin", &host);
//! session.apply(Mutation::InitializeDefaults { page: "about-overview".into() })?;
//! session.save(&host).await?;
//! ```

pub mod defaults;
mod errors;
mod form;
mod ids;
mod mutations;
mod session;
mod templates;

pub use errors::EditorError;
pub use form::{BlockForm, FieldControl, StyleField};
pub use ids::IdGenerator;
pub use mutations::{Direction, Mutation, MutationError, MutationResult};
pub use session::EditSession;
pub use templates::{catalog, find_template, Template, TemplateBlock};
