//! # Folio Renderer
//!
//! Pure rendering of block pages:
//!
//! ```text
//! [Block] + LayoutHint ──render──▶ Layout ──to_vnodes──▶ [VNode] ──render_html──▶ String
//! ```
//!
//! Nothing here mutates the document.

mod html;
mod layout;
mod page;
mod vdom;


pub use html::{render_html, RenderOptions};
pub use layout::{render, Layout, RenderedBlock, Section, IMAGE_PLACEHOLDER};
pub use page::{render_index, render_not_found, render_page, RenderError};
pub use vdom::VNode;
