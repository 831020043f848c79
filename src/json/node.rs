//! Borrowed, never-failing view over a `serde_json::Value`.

use serde_json::Value;

/// Shape of a [`JsonNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// The node does not exist (missing key, wrong container, out of range).
    None,
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A typed view over one node of a parsed JSON document.
///
/// Every accessor is total: descending into a missing key, indexing a
/// non-array, or reading a string as a number yields an absent node or `None`
/// instead of an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNode<'a> {
    value: Option<&'a Value>,
}

impl<'a> JsonNode<'a> {
    /// Wrap a parsed value.
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// The inert node returned by every failed lookup.
    pub fn absent() -> Self {
        Self { value: None }
    }

    pub fn kind(&self) -> JsonKind {
        match self.value {
            None => JsonKind::None,
            Some(Value::Object(_)) => JsonKind::Object,
            Some(Value::Array(_)) => JsonKind::Array,
            Some(Value::String(_)) => JsonKind::String,
            Some(Value::Number(_)) => JsonKind::Number,
            Some(Value::Bool(_)) => JsonKind::Boolean,
            Some(Value::Null) => JsonKind::Null,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_object(&self) -> bool {
        self.kind() == JsonKind::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind() == JsonKind::Array
    }

    /// Look up an object member by name.
    pub fn get(&self, name: &str) -> JsonNode<'a> {
        match self.value {
            Some(Value::Object(map)) => map.get(name).map_or_else(Self::absent, Self::new),
            _ => Self::absent(),
        }
    }

    /// Look up an array element by position.
    pub fn at(&self, index: usize) -> JsonNode<'a> {
        match self.value {
            Some(Value::Array(items)) => items.get(index).map_or_else(Self::absent, Self::new),
            _ => Self::absent(),
        }
    }

    /// Descend through a sequence of object member names.
    pub fn path(&self, names: &[&str]) -> JsonNode<'a> {
        names.iter().fold(*self, |node, name| node.get(name))
    }

    /// Number of elements, for arrays only.
    pub fn len(&self) -> Option<usize> {
        match self.value {
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    /// Array elements; empty for anything that is not an array.
    pub fn elements(&self) -> impl Iterator<Item = JsonNode<'a>> + 'a {
        self.value
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(JsonNode::new)
    }

    /// Object members in document order; empty for anything that is not an object.
    pub fn members(&self) -> impl Iterator<Item = (&'a str, JsonNode<'a>)> + 'a {
        self.value
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .map(|(name, value)| (name.as_str(), JsonNode::new(value)))
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.and_then(Value::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.value.and_then(Value::as_u64)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|n| i32::try_from(n).ok())
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_u64().and_then(|n| u32::try_from(n).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.and_then(Value::as_bool)
    }
}

impl<'a> From<&'a Value> for JsonNode<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tags() {
        let doc = json!({
            "o": {}, "a": [], "s": "x", "n": 1, "b": true, "z": null
        });
        let root = JsonNode::new(&doc);

        assert_eq!(root.get("o").kind(), JsonKind::Object);
        assert_eq!(root.get("a").kind(), JsonKind::Array);
        assert_eq!(root.get("s").kind(), JsonKind::String);
        assert_eq!(root.get("n").kind(), JsonKind::Number);
        assert_eq!(root.get("b").kind(), JsonKind::Boolean);
        assert_eq!(root.get("z").kind(), JsonKind::Null);
        assert_eq!(root.get("missing").kind(), JsonKind::None);
    }

    #[test]
    fn test_chained_lookup_degrades_to_absent() {
        let doc = json!({ "a": { "b": [ { "c": "deep" } ] } });
        let root = JsonNode::new(&doc);

        assert_eq!(root.get("a").get("b").at(0).get("c").as_str(), Some("deep"));
        assert_eq!(root.path(&["a", "b"]).at(0).get("c").as_str(), Some("deep"));

        // Wrong container type, missing key, out of range.
        assert!(root.at(0).is_absent());
        assert!(root.get("a").get("x").get("y").is_absent());
        assert!(root.get("a").get("b").at(5).get("c").is_absent());
        assert!(root.get("a").get("b").get("c").is_absent());
        assert_eq!(JsonNode::absent().get("a").at(3).as_str(), None);
    }

    #[test]
    fn test_typed_getters_reject_mismatched_types() {
        let doc = json!({ "s": "42", "n": 42, "f": 1.5, "b": false, "big": 5_000_000_000u64, "neg": -1 });
        let root = JsonNode::new(&doc);

        assert_eq!(root.get("s").as_i64(), None);
        assert_eq!(root.get("n").as_str(), None);
        assert_eq!(root.get("n").as_i64(), Some(42));
        assert_eq!(root.get("n").as_i32(), Some(42));
        assert_eq!(root.get("f").as_f64(), Some(1.5));
        assert_eq!(root.get("f").as_i64(), None);
        assert_eq!(root.get("b").as_bool(), Some(false));
        assert_eq!(root.get("big").as_i32(), None);
        assert_eq!(root.get("big").as_u32(), None);
        assert_eq!(root.get("big").as_u64(), Some(5_000_000_000));
        assert_eq!(root.get("neg").as_u64(), None);
    }

    #[test]
    fn test_enumeration_of_non_collections_is_empty() {
        let doc = json!({ "items": [1, 2, 3], "obj": { "x": 1, "y": 2 }, "s": "text" });
        let root = JsonNode::new(&doc);

        assert_eq!(root.get("items").elements().count(), 3);
        assert_eq!(root.get("items").len(), Some(3));
        assert_eq!(root.get("s").elements().count(), 0);
        assert_eq!(root.get("s").len(), None);
        assert_eq!(root.get("missing").elements().count(), 0);
        assert_eq!(root.get("items").members().count(), 0);

        let names: Vec<&str> = root.get("obj").members().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"x"));
        assert!(names.contains(&"y"));
    }
}
