use std::fmt;

use serde::{Deserialize, Serialize};

use super::Listed;
use crate::collection::Collection;

define_numeric_id! {
    /// カテゴリ ID
    pub struct CategoryId;
}

/// 料理カテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id:   CategoryId,
    pub name: String,
}

impl Listed for Category {
    const COLLECTION: Collection = Collection::Categories;
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
