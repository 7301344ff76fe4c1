use serde::{Serialize, Serializer};
use std::fmt;

/// Label used for products without a category.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Product category.
///
/// Products with a missing category land in their own `Unknown` bucket so
/// they are still counted by every metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Named(String),
    Unknown,
}

impl Category {
    /// Build a category from an optional raw label.
    ///
    /// Blank labels and the literal `unknown` label both map to `Unknown`, so
    /// each label names exactly one group.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if !l.is_empty() && l != UNKNOWN_CATEGORY => Category::Named(l.to_string()),
            _ => Category::Unknown,
        }
    }

    /// Parse a label picked in the UI. Blank entries select nothing.
    pub fn from_selection(label: &str) -> Option<Self> {
        let label = label.trim();
        (!label.is_empty()).then(|| Category::from_label(Some(label)))
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Named(name) => name,
            Category::Unknown => UNKNOWN_CATEGORY,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from_label(Some(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
