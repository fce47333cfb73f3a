//! Navigation entries, page keys and the page-family layout hint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Navigation families whose pages pair their first image with text.
const SIDE_BY_SIDE_FAMILIES: [&str; 2] = ["ABOUT", "SERVICE"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown: Option<Vec<NavItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            dropdown: None,
            extra: Map::new(),
        }
    }

    pub fn with_dropdown(mut self, items: Vec<NavItem>) -> Self {
        self.dropdown = Some(items);
        self
    }

    /// Page key of this entry
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn children(&self) -> &[NavItem] {
        self.dropdown.as_deref().unwrap_or(&[])
    }
}

/// Derive a page key from a display name.
///
/// Lower-cases the name and collapses every run of characters outside
/// `[a-z0-9]` into one `-`. Leading and trailing runs are kept, so
/// `"Vision & Mission"` becomes `"vision-mission"` and `" Home"` becomes `"-home"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Structural layout of a block page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutHint {
    /// Every block in one full-width flow
    #[default]
    Flow,
    /// First image block paired with the text that follows it
    SideBySide,
}

/// Top-level entry that owns a page: the entry itself, or the entry whose
/// dropdown lists the page.
pub fn family<'a>(navigation: &'a [NavItem], page_key: &str) -> Option<&'a NavItem> {
    navigation.iter().find(|nav| {
        nav.slug() == page_key || nav.children().iter().any(|sub| sub.slug() == page_key)
    })
}

pub fn layout_hint(navigation: &[NavItem], page_key: &str) -> LayoutHint {
    match family(navigation, page_key) {
        Some(nav) if SIDE_BY_SIDE_FAMILIES.contains(&nav.name.as_str()) => LayoutHint::SideBySide,
        _ => LayoutHint::Flow,
    }
}

/// Heading shown above a page
pub fn page_title(navigation: &[NavItem], page_key: &str) -> String {
    match family(navigation, page_key) {
        Some(nav) => nav.name.clone(),
        None => page_key.replace('-', " "),
    }
}
