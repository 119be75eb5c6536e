//! # セッション
//!
//! 認証済みセッションから得られる現在のユーザーとロール。
//!
//! セッションの確立（ログイン、トークン更新）は外部の責務であり、
//! ここではフィルタの適用可否を判断するための値だけを扱う。

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

define_numeric_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// ユーザーロール
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// 来店客（自分の予約・注文のみ閲覧可能）
    #[default]
    Customer,
    /// 従業員
    Employee,
    /// 管理者
    Admin,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::Validation(format!("不正なロール: {}", s))),
        }
    }
}

/// 認証済みセッション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub role:    Role,
}

impl Session {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// 自分のデータしか閲覧できないロールか
    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("customer", Role::Customer)]
    #[case("EMPLOYEE", Role::Employee)]
    #[case("Admin", Role::Admin)]
    fn test_ロールを大文字小文字を問わずパースする(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn test_不正なロールはバリデーションエラー() {
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_user_idを数値文字列からパースする() {
        assert_eq!(" 12 ".parse::<UserId>().unwrap(), UserId::new(12));
        assert!("abc".parse::<UserId>().is_err());
    }
}
