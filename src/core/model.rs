//! Unified Result Model
//!
//! Every command (summarizer or storage-backed) maps its outcome to this
//! unified Result Model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// An extracted email action item
    Action,
    /// A stored record from one of the campus collections
    Record,
    /// Mock session state
    Session,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Creation time in milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ms: Option<i64>,

    /// Number of records behind this item (e.g. participants, reviews)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusError {
    pub code: String,
    pub message: String,
}

impl CampusError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Collection the item belongs to (e.g. "places", "lost_found")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Record id within the collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable text (action items, session lines)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Structured record payload, embedded directly rather than
    /// JSON-in-string escaped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<CampusError>,
}

impl ResultItem {
    /// Create a new action-item result
    pub fn action(text: impl Into<String>) -> Self {
        Self {
            kind: Kind::Action,
            collection: None,
            id: None,
            text: Some(text.into()),
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new record result
    pub fn record(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: Kind::Record,
            collection: Some(collection.into()),
            id: Some(id.into()),
            text: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new session result
    pub fn session(text: impl Into<String>) -> Self {
        Self {
            kind: Kind::Session,
            collection: None,
            id: None,
            text: Some(text.into()),
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new error result
    #[allow(dead_code)]
    pub fn error(error: CampusError) -> Self {
        Self {
            kind: Kind::Error,
            collection: None,
            id: None,
            text: None,
            data: None,
            meta: Meta::default(),
            errors: vec![error],
        }
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set human-readable text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_item_action() {
        let item = ResultItem::action("Submit the form by Friday.");
        assert_eq!(item.kind, Kind::Action);
        assert_eq!(item.text, Some("Submit the form by Friday.".to_string()));
        assert!(item.collection.is_none());
    }

    #[test]
    fn test_result_item_record() {
        let item = ResultItem::record("places", "place_1");
        assert_eq!(item.kind, Kind::Record);
        assert_eq!(item.collection, Some("places".to_string()));
        assert_eq!(item.id, Some("place_1".to_string()));
    }

    #[test]
    fn test_result_item_error() {
        let item = ResultItem::error(CampusError::new("NOT_LOGGED_IN", "no active session"));
        assert_eq!(item.kind, Kind::Error);
        assert_eq!(item.errors.len(), 1);
        assert_eq!(item.errors[0].code, "NOT_LOGGED_IN");
    }

    #[test]
    fn test_result_item_with_data() {
        let data = serde_json::json!({ "title": "Lost keys", "is_found": false });
        let item = ResultItem::record("lost_found", "lf_1").with_data(data.clone());
        assert_eq!(item.data.unwrap(), data);
    }

    #[test]
    fn test_result_item_data_serialization() {
        let data = serde_json::json!({ "price": 42, "category": "books" });
        let item = ResultItem::record("marketplace", "mp_1").with_data(data);
        let json = serde_json::to_string(&item).unwrap();
        // data field is embedded directly, not as an escaped string
        assert!(json.contains("\"data\":{"));
        assert!(json.contains("\"price\":42"));
    }

    #[test]
    fn test_result_item_with_meta() {
        let meta = Meta {
            created_ms: Some(12345),
            count: Some(3),
        };
        let item = ResultItem::record("travel_trips", "trip_1").with_meta(meta);
        assert_eq!(item.meta.created_ms, Some(12345));
        assert_eq!(item.meta.count, Some(3));
    }

    #[test]
    fn test_kind_serialization() {
        let item = ResultItem::action("Do the thing now please.");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"action\""));
    }

    #[test]
    fn test_result_set_push_extend() {
        let mut set = ResultSet::new();
        assert!(set.is_empty());
        set.push(ResultItem::record("places", "a"));
        set.extend(vec![ResultItem::record("places", "b")]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_result_set_from_iter() {
        let set: ResultSet = vec![ResultItem::action("One."), ResultItem::action("Two.")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_result_item_deserialization() {
        let json = r#"{"kind":"record","collection":"places","id":"p1","meta":{}}"#;
        let item: ResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, Kind::Record);
        assert_eq!(item.id, Some("p1".to_string()));
        assert!(item.errors.is_empty());
    }
}
