//! # ページング要求とページングレスポンス
//!
//! 一覧画面がサーバーに要求するページ位置（[`Pageable`]）と、
//! サーバーが返すページ（[`PageableData`]）を定義する。
//!
//! ## 不変条件
//!
//! - `page` は 0 始まり。`u32` なので負にはならない
//! - `size` は 1 以上。`NonZeroU32` で型レベルに保証する
//! - `total` はレコード件数ではなく総ページ数
//! - フィールドが `None` のときは「サーバーのデフォルトに任せる」を意味する
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "content": [...],
//!   "total": 3,
//!   "pageable": { "page": 0, "size": 10, "sort": "date", "order": "desc" }
//! }
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

/// ソート方向
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    /// 昇順
    Asc,
    /// 降順
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::Validation(format!(
                "ソート方向は asc または desc である必要があります: {:?}",
                s
            ))),
        }
    }
}

/// ソートトークン（`"<field>,<order>"`）
///
/// バックエンドが期待する固定のワイヤ表現。方向が未指定の場合はフィールド名のみ。
///
/// ```rust
/// use bistro_domain::pageable::{SortOrder, SortToken};
///
/// let token = SortToken::new("date", Some(SortOrder::Desc));
/// assert_eq!(token.to_string(), "date,desc");
///
/// let parsed: SortToken = "price,asc".parse().unwrap();
/// assert_eq!(parsed.field(), "price");
/// assert_eq!(parsed.order(), Some(SortOrder::Asc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortToken {
    field: String,
    order: Option<SortOrder>,
}

impl SortToken {
    pub fn new(field: impl Into<String>, order: Option<SortOrder>) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }

    /// フィールド名と方向に分解する
    pub fn into_parts(self) -> (String, Option<SortOrder>) {
        (self.field, self.order)
    }
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Some(order) => write!(f, "{},{}", self.field, order),
            None => f.write_str(&self.field),
        }
    }
}

impl FromStr for SortToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(',') {
            Some((field, order)) => (field, Some(order.parse::<SortOrder>()?)),
            None => (s, None),
        };

        if field.is_empty() {
            return Err(DomainError::Validation(format!(
                "ソートフィールドが空です: {:?}",
                s
            )));
        }

        Ok(Self::new(field, order))
    }
}

/// ページング要求
///
/// 一覧画面のマウント時にコレクションごとのデフォルトで作られ、
/// ページ遷移時に `page` が書き換えられ、取得成功のたびにサーバーが返した値で
/// 丸ごと置き換えられる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page:  Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size:  Option<NonZeroU32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort:  Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl Pageable {
    /// すべてサーバーのデフォルトに任せる要求を作成する
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_size(mut self, size: NonZeroU32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(field.into());
        self.order = Some(order);
        self
    }

    /// 現在のページ（未指定なら 0）
    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// ソートトークンを組み立てる
    ///
    /// `sort` が未設定なら `None`。`order` だけが設定されていても送信しない。
    pub fn sort_token(&self) -> Option<SortToken> {
        self.sort
            .as_ref()
            .map(|field| SortToken::new(field.clone(), self.order))
    }

    /// ソートトークンを `sort` / `order` に反映する
    pub fn set_sort_token(&mut self, token: Option<SortToken>) {
        match token {
            Some(token) => {
                let (field, order) = token.into_parts();
                self.sort = Some(field);
                self.order = order;
            }
            None => {
                self.sort = None;
                self.order = None;
            }
        }
    }
}

/// サーバーが返すページ
///
/// `pageable` はサーバーが正規化したページング状態であり、
/// クライアントが保持する `Pageable` を上書きする正とする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageableData<T> {
    pub content:  Vec<T>,
    /// 総ページ数
    pub total:    u64,
    #[serde(default)]
    pub pageable: Pageable,
}

impl<T> PageableData<T> {
    /// 一覧が空か（総ページ数 0）
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[rstest]
    #[case("date,desc", "date", Some(SortOrder::Desc))]
    #[case("price,asc", "price", Some(SortOrder::Asc))]
    #[case("startDate", "startDate", None)]
    fn test_ソートトークンをパースする(
        #[case] input: &str,
        #[case] field: &str,
        #[case] order: Option<SortOrder>,
    ) {
        let token: SortToken = input.parse().unwrap();

        assert_eq!(token.field(), field);
        assert_eq!(token.order(), order);
        assert_eq!(token.to_string(), input);
    }

    #[rstest]
    #[case(",desc")]
    #[case("")]
    #[case("date,DESC")]
    #[case("date,")]
    fn test_不正なソートトークンはバリデーションエラー(#[case] input: &str) {
        let result = input.parse::<SortToken>();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_sortが未設定ならorderがあってもトークンを作らない() {
        let pageable = Pageable {
            order: Some(SortOrder::Desc),
            ..Pageable::default()
        };

        assert_eq!(pageable.sort_token(), None);
    }

    #[test]
    fn test_current_pageは未指定なら0() {
        assert_eq!(Pageable::new().current_page(), 0);
        assert_eq!(Pageable::new().with_page(4).current_page(), 4);
    }

    #[test]
    fn test_set_sort_tokenでnoneを渡すと方向も消える() {
        let mut pageable = Pageable::new().with_sort("date", SortOrder::Asc);

        pageable.set_sort_token(None);

        assert_eq!(pageable, Pageable::new());
    }

    #[test]
    fn test_サーバーレスポンスをデシリアライズする() {
        let json = r#"{
            "content": ["a", "b"],
            "total": 7,
            "pageable": { "page": 2, "size": 10, "sort": "date", "order": "desc" }
        }"#;

        let data: PageableData<String> = serde_json::from_str(json).unwrap();

        assert_eq!(data.content, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(data.total, 7);
        assert_eq!(
            data.pageable,
            Pageable::new()
                .with_page(2)
                .with_size(size(10))
                .with_sort("date", SortOrder::Desc)
        );
        assert!(!data.is_empty());
    }

    #[test]
    fn test_pageableのnullや欠落はnoneとして扱う() {
        let json = r#"{ "content": [], "total": 0, "pageable": { "page": null } }"#;

        let data: PageableData<String> = serde_json::from_str(json).unwrap();

        assert_eq!(data.pageable, Pageable::new());
        assert!(data.is_empty());
    }

    #[test]
    fn test_負のtotalはデシリアライズに失敗する() {
        let json = r#"{ "content": [], "total": -1, "pageable": {} }"#;

        let result = serde_json::from_str::<PageableData<String>>(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_未指定フィールドはシリアライズしない() {
        let pageable = Pageable::new().with_page(1);

        let json = serde_json::to_value(&pageable).unwrap();

        assert_eq!(json, serde_json::json!({ "page": 1 }));
    }
}
