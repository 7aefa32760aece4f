//! Closed enumerations used by rule components.

use serde::{Deserialize, Serialize};

/// How a component treats a sequence-valued field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMode {
    /// The sequence is tested as one unit, optionally replaced by its length.
    #[default]
    Aggregate,
    /// The predicate runs once per element, producing one outcome per element.
    PerItem,
}
