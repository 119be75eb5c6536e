use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Listed;
use crate::{collection::Collection, session::UserId};

define_numeric_id! {
    /// 注文 ID
    pub struct OrderId;
}

/// 注文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id:       OrderId,
    pub date:     NaiveDateTime,
    pub status:   String,
    pub total:    f64,
    #[serde(default)]
    pub customer: Option<UserId>,
}

impl Listed for Order {
    const COLLECTION: Collection = Collection::Orders;
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {:.2}",
            self.id,
            self.date.format("%Y-%m-%d %H:%M"),
            self.status,
            self.total
        )
    }
}
