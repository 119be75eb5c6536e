//! # クエリコーデック
//!
//! ページング要求とフィルタを URL クエリパラメータへ変換し、
//! ルーティング層から渡されるクエリ文字列を [`Pageable`] に戻す。
//!
//! ## ワイヤ規約
//!
//! - `page` と `size` は独立したパラメータ
//! - `sort` と `order` は 1 つのトークン `sort=<field>,<order>` にまとめる
//! - 値のないパラメータは空文字でも送らない
//! - カンマはエスケープしない（`sort=date,desc` のまま送る）

use std::num::NonZeroU32;

use crate::{
    DomainError,
    filter::ListFilter,
    pageable::{Pageable, SortToken},
};

/// 順序付きのクエリパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// 最後に出現した値を取得する
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// クエリ文字列をパースする（先頭の `?` は無視する）
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// `key=value&...` 形式に変換する
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// ブラウザの HTTP ライブラリと同じ規則でエスケープする
///
/// パーセントエンコード後、`:` `$` `,` を戻し、空白は `+` にする。
fn encode_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%3A", ":")
        .replace("%24", "$")
        .replace("%2C", ",")
        .replace("%20", "+")
}

/// ページング要求とフィルタをクエリパラメータに変換する
///
/// ```rust
/// use bistro_domain::{
///     filter::ListFilter,
///     pageable::{Pageable, SortOrder},
///     query,
/// };
///
/// let pageable = Pageable::new().with_page(2).with_sort("date", SortOrder::Desc);
/// let params = query::encode(&pageable, &ListFilter::new());
/// assert_eq!(params.to_query_string(), "page=2&sort=date,desc");
/// ```
pub fn encode(pageable: &Pageable, filter: &ListFilter) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(page) = pageable.page {
        params.push("page", page.to_string());
    }
    if let Some(size) = pageable.size {
        params.push("size", size.to_string());
    }
    if let Some(token) = pageable.sort_token() {
        params.push("sort", token.to_string());
    }
    filter.append_to(&mut params);
    params
}

/// クエリ文字列からページング要求を復元する
///
/// ページング以外のキーは無視する。空の値は未指定として扱う。
///
/// # エラー
///
/// 数値やソートトークンが不正な場合は `DomainError::Validation` を返す。
pub fn decode(query: &str) -> Result<Pageable, DomainError> {
    decode_params(&QueryParams::parse(query))
}

/// パース済みのパラメータからページング要求を復元する
pub fn decode_params(params: &QueryParams) -> Result<Pageable, DomainError> {
    let mut pageable = Pageable::new();

    if let Some(page) = non_empty(params.get("page")) {
        pageable.page = Some(page.parse::<u32>().map_err(|_| {
            DomainError::Validation(format!("page は 0 以上の整数である必要があります: {:?}", page))
        })?);
    }

    if let Some(size) = non_empty(params.get("size")) {
        pageable.size = Some(size.parse::<NonZeroU32>().map_err(|_| {
            DomainError::Validation(format!("size は 1 以上の整数である必要があります: {:?}", size))
        })?);
    }

    if let Some(sort) = non_empty(params.get("sort")) {
        pageable.set_sort_token(Some(sort.parse::<SortToken>()?));
    }

    Ok(pageable)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Pageable {
    /// ルーティング層のクエリ文字列から初期値を作る
    ///
    /// 指定のないフィールドは `defaults` の値を引き継ぐ。
    pub fn from_query_hint(query: &str, defaults: Pageable) -> Result<Pageable, DomainError> {
        let hint = decode(query)?;
        let mut merged = defaults;
        if hint.page.is_some() {
            merged.page = hint.page;
        }
        if hint.size.is_some() {
            merged.size = hint.size;
        }
        if hint.sort.is_some() {
            merged.set_sort_token(hint.sort_token());
        }
        Ok(merged)
    }
}
