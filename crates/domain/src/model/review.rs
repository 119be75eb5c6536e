use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Listed;
use crate::collection::Collection;

define_numeric_id! {
    /// レビュー ID
    pub struct ReviewId;
}

/// レビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id:      ReviewId,
    pub date:    NaiveDateTime,
    /// 評価（1〜5）
    pub rating:  u8,
    pub content: String,
    #[serde(default)]
    pub author:  Option<String>,
}

impl Listed for Review {
    const COLLECTION: Collection = Collection::Reviews;
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ★{} {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.rating,
            self.content
        )?;
        if let Some(author) = &self.author {
            write!(f, " ({author})")?;
        }
        Ok(())
    }
}
