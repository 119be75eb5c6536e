use std::fmt;

use serde::{Deserialize, Serialize};

use super::Listed;
use crate::{
    collection::Collection,
    session::{Role, UserId},
};

/// ユーザー（管理画面の一覧用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id:       UserId,
    pub username: String,
    pub email:    String,
    pub role:     Role,
}

impl Listed for User {
    const COLLECTION: Collection = Collection::Users;
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}> {}", self.id, self.username, self.email, self.role)
    }
}
