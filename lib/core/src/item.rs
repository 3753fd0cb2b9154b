use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of an item within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Integer(u64),
    String(String),
}

impl ItemId {
    /// Parse an id the way it would appear in a table cell or on the command line:
    /// integers become `Integer`, anything else stays a string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<u64>()
            .map(ItemId::Integer)
            .unwrap_or_else(|_| ItemId::String(trimmed.to_string()))
    }

    /// Convert a JSON value into an id, if it is a non-negative integer or a string
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(ItemId::Integer),
            Value::String(s) => Some(ItemId::String(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Integer(i) => write!(f, "{}", i),
            ItemId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(i: u64) -> Self {
        ItemId::Integer(i)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::String(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::String(s.to_string())
    }
}

/// A catalog row: an id plus named fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Item {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Shorthand for an item whose fields are all numeric
    pub fn with_features<S: AsRef<str>>(id: impl Into<ItemId>, features: &[(S, f64)]) -> Self {
        features
            .iter()
            .fold(Self::new(id), |item, (name, value)| {
                item.with_field(name.as_ref(), *value)
            })
    }

    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Numeric value of a field, `None` if absent or not a number
    #[inline]
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    #[inline]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}
