//! REST API クライアントの構造体

use bistro_domain::{collection::Collection, query::QueryParams};
use reqwest::header::ACCEPT;

use crate::error::ClientError;

/// REST API クライアント
///
/// コレクションの一覧取得は [`PageSource`](crate::PageSource) 経由で行う。
#[derive(Clone)]
pub struct ApiClient {
    base_url:     String,
    client:       reqwest::Client,
    bearer_token: Option<String>,
}

impl ApiClient {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: バックエンドのベース URL（例: `http://localhost:8080/api`）
    ///
    /// # エラー
    ///
    /// URL として解釈できない場合は `ClientError::Validation` を返す。
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        url::Url::parse(base_url).map_err(|e| {
            ClientError::Validation(format!("ベース URL が不正です: {base_url:?} ({e})"))
        })?;

        Ok(Self {
            base_url:     base_url.trim_end_matches('/').to_string(),
            client:       reqwest::Client::new(),
            bearer_token: None,
        })
    }

    /// 認証済みセッションのトークンを付与する
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// コレクションの一覧 URL を組み立てる（パラメータがなければ `?` を付けない）
    pub fn collection_url(&self, collection: Collection, params: &QueryParams) -> String {
        let mut url = format!("{}{}", self.base_url, collection.endpoint());
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.to_query_string());
        }
        url
    }

    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, "application/json");
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
