use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CategoryId, Listed};
use crate::collection::Collection;

define_numeric_id! {
    /// 料理 ID
    pub struct DishId;
}

/// 料理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id:          DishId,
    pub name:        String,
    pub price:       f64,
    /// 割引率（%）
    #[serde(default)]
    pub discount:    f64,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Dish {
    /// 割引適用後の価格
    pub fn discounted_price(&self) -> f64 {
        self.price * (100.0 - self.discount.clamp(0.0, 100.0)) / 100.0
    }
}

impl Listed for Dish {
    const COLLECTION: Collection = Collection::Dishes;
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {:.2}", self.id, self.name, self.price)?;
        if self.discount > 0.0 {
            write!(f, " (-{}% → {:.2})", self.discount, self.discounted_price())?;
        }
        Ok(())
    }
}
