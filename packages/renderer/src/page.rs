//! Full public pages: hero heading, sub-navigation and the block body.

use crate::html::{escape_html, write_node, Context, RenderOptions};
use crate::layout::render;
use crate::vdom::VNode;
use folio_model::{family, SiteDocument, Slot};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

const BASE_CSS: &str = "\
body { margin: 0; font-family: sans-serif; }
.folio-hero { background: #1a202c; padding: 80px 16px; text-align: center; }
.folio-hero h1 { color: #ffffff; text-transform: uppercase; letter-spacing: -0.05em; margin: 0; }
.folio-subnav { display: flex; justify-content: center; gap: 32px; padding: 16px; border-bottom: 1px solid #f3f4f6; }
.folio-subnav a { color: #9ca3af; font-size: 12px; font-weight: 700; text-transform: uppercase; text-decoration: none; }
.folio-subnav a.active { color: #C8102E; }
.folio-content { max-width: 1280px; margin: 0 auto; padding: 64px 16px; }
.folio-flow { display: flex; flex-wrap: wrap; }
.folio-pair { display: grid; grid-template-columns: 1fr 1fr; gap: 48px; align-items: start; margin-bottom: 48px; }
.folio-empty { min-height: 60vh; display: flex; align-items: center; justify-content: center; color: #6b7280; font-style: italic; }
@media (max-width: 768px) { .folio-pair { grid-template-columns: 1fr; } }";

/// Render one page slot as a complete HTML document.
///
/// Slots without blocks render the "under construction" notice. Keys that are
/// neither a slot nor reachable from navigation are not found.
pub fn render_page(
    document: &SiteDocument,
    page_key: &str,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let slot = document.slot(page_key);
    let owner = family(document.navigation(), page_key);
    if slot.is_none() && owner.is_none() {
        return Err(RenderError::PageNotFound(page_key.to_string()));
    }

    let title = document.page_title(page_key);
    let mut body = vec![VNode::element("header")
        .with_class("folio-hero")
        .with_child(VNode::element("h1").with_child(VNode::text(title.as_str())))];

    let sub_items = owner.map(|nav| nav.children()).unwrap_or(&[]);
    if !sub_items.is_empty() {
        body.push(
            VNode::element("nav")
                .with_class("folio-subnav")
                .with_children(sub_items.iter().map(|item| {
                    let link = VNode::element("a")
                        .with_attr("href", item.path.as_str())
                        .with_child(VNode::text(item.name.as_str()));
                    if item.slug() == page_key {
                        link.with_class("active")
                    } else {
                        link
                    }
                })),
        );
    }

    let main = match slot {
        Some(Slot::Blocks(page)) => {
            let layout = render(&page.blocks, document.layout_hint(page_key));
            VNode::element("main")
                .with_class("folio-content")
                .with_children(layout.to_vnodes())
        }
        _ => VNode::element("main").with_class("folio-content").with_child(
            VNode::element("div").with_class("folio-empty").with_child(
                VNode::element("p").with_child(VNode::text(
                    "This page is under construction or has no content yet.",
                )),
            ),
        ),
    };
    body.push(main);

    Ok(wrap_document(&title, body, options))
}

/// Landing page listing every reachable page
pub fn render_index(document: &SiteDocument, options: &RenderOptions) -> String {
    let mut links = Vec::new();
    for nav in document.navigation() {
        links.push(page_link(&nav.name, &nav.slug()));
        for sub in nav.children() {
            links.push(page_link(&format!("{} / {}", nav.name, sub.name), &sub.slug()));
        }
    }

    let listed: Vec<String> = document
        .navigation()
        .iter()
        .flat_map(|nav| std::iter::once(nav).chain(nav.children().iter()))
        .map(|nav| nav.slug())
        .collect();
    for key in document.block_page_keys() {
        if !listed.iter().any(|k| k == key) {
            links.push(page_link(key, key));
        }
    }

    let body = vec![
        VNode::element("header")
            .with_class("folio-hero")
            .with_child(VNode::element("h1").with_child(VNode::text("Pages"))),
        VNode::element("main")
            .with_class("folio-content")
            .with_child(VNode::element("ul").with_children(links)),
    ];
    wrap_document("Pages", body, options)
}

/// Page shown for keys and paths that lead nowhere
pub fn render_not_found(page_key: &str, options: &RenderOptions) -> String {
    let body = vec![
        VNode::element("header")
            .with_class("folio-hero")
            .with_child(VNode::element("h1").with_child(VNode::text("Page not found"))),
        VNode::element("main").with_class("folio-content").with_child(
            VNode::element("div").with_class("folio-empty").with_child(
                VNode::element("p")
                    .with_child(VNode::text(format!("There is no page called \"{}\".", page_key))),
            ),
        ),
    ];
    wrap_document("Page not found", body, options)
}

fn page_link(label: &str, key: &str) -> VNode {
    VNode::element("li").with_child(
        VNode::element("a")
            .with_attr("href", format!("/pages/{}", key))
            .with_child(VNode::text(label)),
    )
}

fn wrap_document(title: &str, body: Vec<VNode>, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.add_line("<style>");
    for line in BASE_CSS.lines() {
        ctx.add_line(line);
    }
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in &body {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");
    ctx.get_output()
}
