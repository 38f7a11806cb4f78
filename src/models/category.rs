//! Expense category
//!
//! The dashboard offers a fixed set of categories. Records coming back from
//! the remote API are not guaranteed to use one of them, so unknown labels are
//! kept verbatim instead of failing the whole fetch. Matching is exact and
//! case-sensitive: "food" is not `Food`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Other,
    /// A label outside the fixed set, preserved as received
    Unrecognized(String),
}

impl Category {
    /// The categories offered for new and edited expenses, in menu order
    pub const KNOWN: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Other,
    ];

    /// The label used on the wire and in the terminal
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
            Category::Unrecognized(label) => label,
        }
    }

    /// Map a label onto the fixed set, keeping unknown labels verbatim
    pub fn from_label(label: &str) -> Self {
        match label {
            "Food" => Category::Food,
            "Transport" => Category::Transport,
            "Entertainment" => Category::Entertainment,
            "Utilities" => Category::Utilities,
            "Shopping" => Category::Shopping,
            "Other" => Category::Other,
            other => Category::Unrecognized(other.to_string()),
        }
    }

    /// Check if this is one of the fixed categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }

    /// Comma-separated list of the fixed category labels, for help and errors
    pub fn known_labels() -> String {
        Self::KNOWN
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Strict parsing for user input: only the fixed labels are accepted
impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Category::from_label(s) {
            Category::Unrecognized(label) => Err(CategoryParseError::Unknown(label)),
            known => Ok(known),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

/// Error returned when user input names a category outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Unknown(label) => write!(
                f,
                "Unknown category '{}'. Expected one of: {}",
                label,
                Category::known_labels()
            ),
        }
    }
}

impl std::error::Error for CategoryParseError {}
