use super::NodeId;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// Derived value of every evaluated node.
///
/// `None` means "currently unevaluable". A node missing from the table is
/// reported the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueTable(AHashMap<NodeId, Option<f64>>);

impl ValueTable {
    pub fn new() -> Self {
        Self(AHashMap::new())
    }

    pub fn get(&self, id: &NodeId) -> Option<f64> {
        self.0.get(id).copied().flatten()
    }

    /// Whether the evaluator visited the node at all.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, Option<f64>)> {
        self.0.iter().map(|(id, value)| (id, *value))
    }

    pub(crate) fn insert(&mut self, id: NodeId, value: Option<f64>) {
        self.0.insert(id, value);
    }
}

/// Display wrapper rendering integral numbers without a fractional part
/// and missing values as `null`.
pub struct DisplayValue(pub Option<f64>);

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                write!(f, "{}", n as i64)
            }
            Some(n) => write!(f, "{}", n),
            None => write!(f, "null"),
        }
    }
}

pub fn format_value(value: Option<f64>) -> String {
    DisplayValue(value).to_string()
}
