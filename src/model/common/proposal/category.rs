use serde::{Deserialize, Serialize};

/// The kind of dish a proposal suggests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCategory {
    Korean,
    Japanese,
    Chinese,
    Western,
    Snack,
    Dessert,
}
