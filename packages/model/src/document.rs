//! # Site Document
//!
//! The whole site as one ordered JSON object. Each top-level key is a slot,
//! classified once at the load boundary:
//!
//! - `navigation` → [`Slot::Navigation`]
//! - object carrying a `blocks` array → [`Slot::Blocks`]
//! - any other object → [`Slot::Record`] (legacy page or simple record)
//! - anything else → [`Slot::Value`]
//!
//! Malformed blocks never fail a load. They are held out of the typed page,
//! reported as [`Diagnostic`]s and written back untouched on save, so the
//! page still renders and no stored data is lost.

use crate::block::{validate_block, Block, BlockId};
use crate::error::ModelError;
use crate::navigation::{self, LayoutHint, NavItem};
use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const NAVIGATION_KEY: &str = "navigation";
pub const BLOCKS_KEY: &str = "blocks";

/// Raw entry of a `blocks` array that failed validation.
///
/// Written back right after the block it followed when loaded, or at the end
/// of the array once that block is gone.
#[derive(Debug, Clone, PartialEq)]
struct HeldBlock {
    after: Option<BlockId>,
    raw: Value,
}

/// Ordered block sequence of one page.
///
/// Fields stored next to `blocks` (legacy content kept after a conversion)
/// are preserved, and `blocks` is written back at its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPage {
    pub blocks: Vec<Block>,
    held: Vec<HeldBlock>,
    fields: Map<String, Value>,
    blocks_at: usize,
}

impl BlockPage {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Turn a record into a block page, appending `blocks` after its fields.
    pub fn from_record(fields: Map<String, Value>, blocks: Vec<Block>) -> Self {
        let blocks_at = fields.len();
        Self {
            blocks,
            held: Vec::new(),
            fields,
            blocks_at,
        }
    }

    /// Replace the whole sequence, discarding held malformed entries too.
    pub fn replace_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.held.clear();
    }

    /// Number of malformed entries kept for writing back
    pub fn held_len(&self) -> usize {
        self.held.len()
    }

    /// True when neither valid nor held entries exist
    pub fn has_no_entries(&self) -> bool {
        self.blocks.is_empty() && self.held.is_empty()
    }

    /// Ids of valid blocks plus any readable id on a held entry
    pub fn every_id(&self) -> Vec<BlockId> {
        let held = self.held.iter().filter_map(|h| {
            h.raw
                .get("id")
                .and_then(|id| serde_json::from_value::<BlockId>(id.clone()).ok())
        });
        self.ids().into_iter().chain(held).collect()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn find_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    fn held_after<'a>(&'a self, anchor: Option<&'a BlockId>) -> impl Iterator<Item = &'a HeldBlock> + 'a {
        self.held.iter().filter(move |h| h.after.as_ref() == anchor)
    }

    fn parse(slot: &str, mut object: Map<String, Value>, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let blocks_at = object
            .keys()
            .position(|k| k == BLOCKS_KEY)
            .unwrap_or(object.len());
        let raw_blocks = match object.shift_remove(BLOCKS_KEY) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        let mut blocks: Vec<Block> = Vec::with_capacity(raw_blocks.len());
        let mut held = Vec::new();
        for (index, raw) in raw_blocks.into_iter().enumerate() {
            let parsed = validate_block(&raw).and_then(|_| Block::from_value(raw.clone()));
            match parsed {
                Ok(block) => blocks.push(block),
                Err(error) => {
                    tracing::warn!(slot, index, %error, "Holding malformed block out of the page");
                    diagnostics.push(Diagnostic {
                        slot: slot.to_string(),
                        index: Some(index),
                        error,
                    });
                    held.push(HeldBlock {
                        after: blocks.last().map(|b| b.id.clone()),
                        raw,
                    });
                }
            }
        }

        Self {
            blocks,
            held,
            fields: object,
            blocks_at,
        }
    }
}

/// The `blocks` array as stored: valid blocks with held entries in between
struct StoredBlocks<'a>(&'a BlockPage);

impl Serialize for StoredBlocks<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let page = self.0;
        let mut seq = serializer.serialize_seq(Some(page.blocks.len() + page.held.len()))?;
        for entry in page.held_after(None) {
            seq.serialize_element(&entry.raw)?;
        }
        for (index, block) in page.blocks.iter().enumerate() {
            seq.serialize_element(block)?;
            if page.position(&block.id) != Some(index) {
                continue;
            }
            for entry in page.held_after(Some(&block.id)) {
                seq.serialize_element(&entry.raw)?;
            }
        }
        for entry in page
            .held
            .iter()
            .filter(|h| h.after.as_ref().is_some_and(|id| !page.contains(id)))
        {
            seq.serialize_element(&entry.raw)?;
        }
        seq.end()
    }
}

impl Serialize for BlockPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        let mut written = false;
        for (index, (key, value)) in self.fields.iter().enumerate() {
            if index == self.blocks_at {
                map.serialize_entry(BLOCKS_KEY, &StoredBlocks(self))?;
                written = true;
            }
            map.serialize_entry(key, value)?;
        }
        if !written {
            map.serialize_entry(BLOCKS_KEY, &StoredBlocks(self))?;
        }
        map.end()
    }
}

/// One top-level entry of the site document
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Blocks(BlockPage),
    Navigation(Vec<NavItem>),
    Record(Map<String, Value>),
    Value(Value),
}

impl Slot {
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Blocks(_) => "blocks",
            Slot::Navigation(_) => "navigation",
            Slot::Record(_) => "record",
            Slot::Value(_) => "value",
        }
    }

    fn parse(key: &str, value: Value, diagnostics: &mut Vec<Diagnostic>) -> Self {
        if key == NAVIGATION_KEY {
            return match serde_json::from_value::<Vec<NavItem>>(value.clone()) {
                Ok(items) => Slot::Navigation(items),
                Err(e) => {
                    tracing::warn!(error = %e, "Navigation is malformed, keeping raw value");
                    diagnostics.push(Diagnostic {
                        slot: key.to_string(),
                        index: None,
                        error: e.into(),
                    });
                    Slot::Value(value)
                }
            };
        }

        match value {
            Value::Object(object) => match object.get(BLOCKS_KEY) {
                Some(Value::Array(_)) => Slot::Blocks(BlockPage::parse(key, object, diagnostics)),
                Some(_) => {
                    diagnostics.push(Diagnostic {
                        slot: key.to_string(),
                        index: None,
                        error: ModelError::InvalidField {
                            field: "blocks",
                            expected: "array",
                        },
                    });
                    Slot::Record(object)
                }
                None => Slot::Record(object),
            },
            other => Slot::Value(other),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Blocks(page) => page.serialize(serializer),
            Slot::Navigation(items) => items.serialize(serializer),
            Slot::Record(object) => object.serialize(serializer),
            Slot::Value(value) => value.serialize(serializer),
        }
    }
}

/// Data problem found while loading, recovered by holding or defaulting
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub slot: String,
    pub index: Option<usize>,
    pub error: ModelError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}.blocks[{}]: {}", self.slot, index, self.error),
            None => write!(f, "{}: {}", self.slot, self.error),
        }
    }
}

/// The complete site content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteDocument {
    slots: Vec<(String, Slot)>,
}

impl SiteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and classify a raw JSON value.
    pub fn from_value(value: Value) -> Result<(Self, Vec<Diagnostic>), ModelError> {
        let Value::Object(object) = value else {
            return Err(ModelError::NotAnObject);
        };

        let mut diagnostics = Vec::new();
        let slots = object
            .into_iter()
            .map(|(key, value)| {
                let slot = Slot::parse(&key, value, &mut diagnostics);
                (key, slot)
            })
            .collect();

        Ok((Self { slots }, diagnostics))
    }

    pub fn from_json_str(source: &str) -> Result<(Self, Vec<Diagnostic>), ModelError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty JSON with two-space indentation, the on-disk format
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(k, _)| k.as_str())
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn slot_mut(&mut self, key: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    /// Replace a slot in place, or append it when the key is new.
    pub fn insert(&mut self, key: impl Into<String>, slot: Slot) {
        let key = key.into();
        match self.slot_mut(&key) {
            Some(existing) => *existing = slot,
            None => self.slots.push((key, slot)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Slot> {
        let index = self.slots.iter().position(|(k, _)| k == key)?;
        Some(self.slots.remove(index).1)
    }

    pub fn block_page(&self, key: &str) -> Option<&BlockPage> {
        match self.slot(key) {
            Some(Slot::Blocks(page)) => Some(page),
            _ => None,
        }
    }

    pub fn block_page_mut(&mut self, key: &str) -> Option<&mut BlockPage> {
        match self.slot_mut(key) {
            Some(Slot::Blocks(page)) => Some(page),
            _ => None,
        }
    }

    pub fn block_page_keys(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|(_, s)| matches!(s, Slot::Blocks(_)))
            .map(|(k, _)| k.as_str())
    }

    pub fn navigation(&self) -> &[NavItem] {
        match self.slot(NAVIGATION_KEY) {
            Some(Slot::Navigation(items)) => items,
            _ => &[],
        }
    }

    pub fn layout_hint(&self, page_key: &str) -> LayoutHint {
        navigation::layout_hint(self.navigation(), page_key)
    }

    pub fn page_title(&self, page_key: &str) -> String {
        navigation::page_title(self.navigation(), page_key)
    }

    /// Page key served at a navigation path
    pub fn page_for_path(&self, path: &str) -> Option<String> {
        self.navigation()
            .iter()
            .flat_map(|nav| std::iter::once(nav).chain(nav.children().iter()))
            .find(|nav| nav.path == path)
            .map(NavItem::slug)
    }
}

impl Serialize for SiteDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, slot) in &self.slots {
            map.serialize_entry(key, slot)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SiteDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let (document, _) = SiteDocument::from_value(value).map_err(D::Error::custom)?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "logo": { "text": "CK", "image": "/logo.png" },
            "navigation": [
                { "name": "HOME", "path": "/" },
                { "name": "ABOUT", "path": "/about", "dropdown": [
                    { "name": "Company Overview", "path": "/about/overview" }
                ]}
            ],
            "home": { "hero": { "title": "Welcome" } },
            "company-overview": {
                "blocks": [
                    { "id": 1, "type": "text", "content": "Intro", "styles": { "fontSize": "32px" } },
                    { "id": 2, "type": "image", "content": "a.png", "styles": { "fullWidth": true, "paddingLeft": "4px" } }
                ]
            },
            "adminPassword": "secret"
        })
    }

    #[test]
    fn test_slots_are_classified() {
        let (doc, diagnostics) = SiteDocument::from_value(sample()).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(doc.slot("logo").map(Slot::kind), Some("record"));
        assert_eq!(doc.slot("navigation").map(Slot::kind), Some("navigation"));
        assert_eq!(doc.slot("home").map(Slot::kind), Some("record"));
        assert_eq!(doc.slot("company-overview").map(Slot::kind), Some("blocks"));
        assert_eq!(doc.slot("adminPassword").map(Slot::kind), Some("value"));
        assert_eq!(doc.block_page("company-overview").unwrap().len(), 2);
    }

    #[test]
    fn test_untouched_document_round_trips() {
        let original = serde_json::to_string_pretty(&sample()).unwrap();
        let (doc, _) = SiteDocument::from_json_str(&original).unwrap();
        assert_eq!(doc.to_json_pretty().unwrap(), original);
    }

    #[test]
    fn test_blocks_keep_their_position_among_fields() {
        let raw = json!({ "page": { "hero": 1, "blocks": [], "footer": 2 } });
        let (doc, _) = SiteDocument::from_value(raw.clone()).unwrap();
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            serde_json::to_string(&raw).unwrap()
        );
    }

    #[test]
    fn test_malformed_blocks_are_held_and_reported() {
        let raw = json!({
            "page": { "blocks": [
                { "id": 1, "type": "text", "content": "ok", "styles": {} },
                { "id": 2, "type": "video", "content": "bad", "styles": {} },
                { "id": 3, "type": "text", "content": "ok too", "styles": {} }
            ]}
        });
        let (doc, diagnostics) = SiteDocument::from_value(raw.clone()).unwrap();
        let page = doc.block_page("page").unwrap();
        assert_eq!(page.ids(), vec![BlockId::int(1), BlockId::int(3)]);
        assert_eq!(page.held_len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].index, Some(1));
        assert_eq!(diagnostics[0].to_string(), "page.blocks[1]: Unknown block type: video");
        assert_eq!(doc.to_value().unwrap(), raw);
    }

    #[test]
    fn test_held_blocks_follow_their_neighbour() {
        let raw = json!({
            "page": { "blocks": [
                { "id": 0, "content": "no type" },
                { "id": 1, "type": "text", "content": "a", "styles": {} },
                { "id": 2, "type": "text", "content": "b", "styles": {} },
                "stray",
                { "id": 3, "type": "text", "content": "c", "styles": {} }
            ]}
        });
        let (mut doc, _) = SiteDocument::from_value(raw).unwrap();
        let page = doc.block_page_mut("page").unwrap();
        page.blocks.swap(0, 2);
        page.blocks.retain(|b| b.id != BlockId::int(2));

        let saved = doc.to_value().unwrap();
        let ids: Vec<Value> = saved["page"]["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b.get("id").cloned().unwrap_or_else(|| b.clone()))
            .collect();
        assert_eq!(ids, vec![json!(0), json!(3), json!(1), json!("stray")]);
        assert_eq!(
            doc.block_page("page").unwrap().every_id(),
            vec![BlockId::int(3), BlockId::int(1), BlockId::int(0)]
        );
    }

    #[test]
    fn test_replacing_blocks_discards_held_entries() {
        let raw = json!({ "page": { "blocks": [{ "id": 9 }] } });
        let (mut doc, diagnostics) = SiteDocument::from_value(raw).unwrap();
        assert_eq!(diagnostics.len(), 1);
        let page = doc.block_page_mut("page").unwrap();
        assert!(page.is_empty());
        assert!(!page.has_no_entries());
        page.replace_blocks(Vec::new());
        assert_eq!(doc.to_value().unwrap(), json!({ "page": { "blocks": [] } }));
    }

    #[test]
    fn test_block_without_styles_round_trips() {
        let raw = json!({ "page": { "blocks": [
            { "id": 7, "type": "text", "content": "bare" },
            { "id": 8, "type": "text", "content": "kept", "styles": {}, "alt": "extra" }
        ]}});
        let (doc, diagnostics) = SiteDocument::from_value(raw.clone()).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(doc.block_page("page").unwrap().len(), 2);
        assert_eq!(
            doc.to_json_pretty().unwrap(),
            serde_json::to_string_pretty(&raw).unwrap()
        );
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            SiteDocument::from_value(json!([1, 2])).unwrap_err(),
            ModelError::NotAnObject
        );
    }

    #[test]
    fn test_navigation_queries() {
        let (doc, _) = SiteDocument::from_value(sample()).unwrap();
        assert_eq!(doc.layout_hint("company-overview"), LayoutHint::SideBySide);
        assert_eq!(doc.layout_hint("home"), LayoutHint::Flow);
        assert_eq!(doc.page_for_path("/about/overview").as_deref(), Some("company-overview"));
        assert_eq!(doc.page_for_path("/nowhere"), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let (mut doc, _) = SiteDocument::from_value(sample()).unwrap();
        doc.insert("logo", Slot::Value(json!("text only")));
        assert_eq!(doc.keys().next(), Some("logo"));
        doc.insert("careers", Slot::Blocks(BlockPage::default()));
        assert_eq!(doc.keys().last(), Some("careers"));
    }
}
