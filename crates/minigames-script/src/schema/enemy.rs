//! Enemy definition schema

use serde::{Deserialize, Serialize};

/// An enemy and the names of the cards it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<String>,
}
