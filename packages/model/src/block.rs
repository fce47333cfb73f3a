use crate::error::ModelError;
use crate::style::StyleSet;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Block identifier, unique within one page.
///
/// Older editors minted ids from a millisecond clock plus a random fraction,
/// so any JSON number is accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(Number),
    Text(String),
}

impl BlockId {
    pub fn int(value: i64) -> Self {
        BlockId::Number(Number::from(value))
    }

    /// Numeric magnitude, used to keep freshly generated ids above existing ones
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BlockId::Number(n) => n.as_f64(),
            BlockId::Text(_) => None,
        }
    }

    /// Parse an id typed by a user: numbers stay numbers, anything else is text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return BlockId::int(value);
        }
        match raw.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) if raw.chars().all(|c| c.is_ascii_digit() || c == '.') => BlockId::Number(n),
            _ => BlockId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{}", n),
            BlockId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for BlockId {
    fn from(value: i64) -> Self {
        BlockId::int(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
        }
    }
}

impl std::str::FromStr for BlockKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(BlockKind::Text),
            "image" => Ok(BlockKind::Image),
            other => Err(ModelError::UnknownType(other.to_string())),
        }
    }
}

/// One unit of page content.
///
/// A block saved without `styles` reads as an empty set and is written back
/// without the key until a style is set. Fields this model does not know
/// (`alt`, editor hints) travel in `extra` and are written after `styles`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Plain text for text blocks, URL or data URI for images
    pub content: String,
    #[serde(default)]
    pub styles: StyleSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    styles_absent: bool,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind, content: impl Into<String>, styles: StyleSet) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            styles,
            extra: Map::new(),
            styles_absent: false,
        }
    }

    /// Read a block that already passed [`validate_block`].
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let styles_absent = value.get("styles").is_none();
        let mut block: Block = serde_json::from_value(value)?;
        block.styles_absent = styles_absent;
        Ok(block)
    }

    pub fn is_image(&self) -> bool {
        self.kind == BlockKind::Image
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let write_styles = !(self.styles_absent && self.styles.is_empty());
        let mut map = serializer.serialize_map(Some(4 + self.extra.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", &self.kind)?;
        map.serialize_entry("content", &self.content)?;
        if write_styles {
            map.serialize_entry("styles", &self.styles)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Shape check for a raw block value.
pub fn validate_block(value: &Value) -> Result<(), ModelError> {
    let object = value.as_object().ok_or(ModelError::InvalidField {
        field: "block",
        expected: "object",
    })?;

    match object.get("id") {
        None | Some(Value::Null) => return Err(ModelError::MissingField("id")),
        Some(Value::Number(_)) | Some(Value::String(_)) => {}
        Some(_) => {
            return Err(ModelError::InvalidField {
                field: "id",
                expected: "number or string",
            })
        }
    }

    match object.get("type") {
        None => return Err(ModelError::MissingField("type")),
        Some(Value::String(kind)) => {
            kind.parse::<BlockKind>()?;
        }
        Some(other) => return Err(ModelError::UnknownType(other.to_string())),
    }

    match object.get("content") {
        None => return Err(ModelError::MissingField("content")),
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(ModelError::InvalidField {
                field: "content",
                expected: "string",
            })
        }
    }

    match object.get("styles") {
        None | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(ModelError::InvalidField {
            field: "styles",
            expected: "object",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_minimal_block() {
        let block = json!({ "id": 1, "type": "text", "content": "Hi", "styles": {} });
        assert_eq!(validate_block(&block), Ok(()));
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let no_type = json!({ "id": 1, "content": "Hi", "styles": {} });
        assert_eq!(validate_block(&no_type), Err(ModelError::MissingField("type")));

        let no_id = json!({ "type": "image", "content": "a.png", "styles": {} });
        assert_eq!(validate_block(&no_id), Err(ModelError::MissingField("id")));
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let block = json!({ "id": 1, "type": "video", "content": "x", "styles": {} });
        assert_eq!(
            validate_block(&block),
            Err(ModelError::UnknownType("video".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_non_string_content() {
        let block = json!({ "id": 1, "type": "text", "content": 42, "styles": {} });
        assert!(matches!(
            validate_block(&block),
            Err(ModelError::InvalidField { field: "content", .. })
        ));
    }

    #[test]
    fn test_fractional_ids_round_trip() {
        let raw = r#"{"id":1712345678901.25,"type":"image","content":"a.png","styles":{}}"#;
        let block: Block = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&block).unwrap(), raw);
    }

    #[test]
    fn test_missing_styles_read_as_empty_and_stay_absent() {
        let raw = json!({ "id": 7, "type": "text", "content": "Hi" });
        assert_eq!(validate_block(&raw), Ok(()));

        let mut block = Block::from_value(raw.clone()).unwrap();
        assert!(block.styles.is_empty());
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);

        block.styles.set("textAlign", "center");
        assert_eq!(
            serde_json::to_value(&block).unwrap()["styles"],
            json!({ "textAlign": "center" })
        );
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let raw = r#"{"id":8,"type":"image","content":"a.png","styles":{},"alt":"Factory floor"}"#;
        let block = Block::from_value(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(block.extra.get("alt"), Some(&json!("Factory floor")));
        assert_eq!(serde_json::to_string(&block).unwrap(), raw);
    }

    #[test]
    fn test_parse_user_ids() {
        assert_eq!(BlockId::parse("42"), BlockId::int(42));
        assert_eq!(BlockId::parse("hero"), BlockId::Text("hero".to_string()));
        assert_eq!(BlockId::parse("1.5").as_f64(), Some(1.5));
    }
}
