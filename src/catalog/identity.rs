use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Versioned key for a reference catalog edition (e.g., `ansi_sql_v1`).
///
/// Carried alongside rendered output and repository lookups so consumers can
/// tell which catalog snapshot an entry came from.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Name of an individual documented term, unique within a catalog.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermName(pub String);

impl TermName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Grouping label for catalog entries.
///
/// Known variants keep serialization consistent; `Other` preserves forward
/// compatibility with catalogs that introduce new categories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Category {
    Basic,
    Join,
    Constraint,
    SetOp,
    Aggregate,
    RelationalAlgebra,
    Other(String),
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Basic => "basic",
            Category::Join => "join",
            Category::Constraint => "constraint",
            Category::SetOp => "set_op",
            Category::Aggregate => "aggregate",
            Category::RelationalAlgebra => "relational_algebra",
            Category::Other(value) => value.as_str(),
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "basic" => Category::Basic,
            "join" => Category::Join,
            "constraint" => Category::Constraint,
            "set_op" => Category::SetOp,
            "aggregate" => Category::Aggregate,
            "relational_algebra" => Category::RelationalAlgebra,
            other => Category::Other(other.to_string()),
        }
    }
}
