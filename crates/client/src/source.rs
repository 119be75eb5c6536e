//! # ページ取得の契約
//!
//! `load(pageable, filter) -> PageableData<T>` を [`PageSource`] として表現する。
//!
//! - 送信前にコレクションの語彙でページング要求を検証する
//! - 失敗してもリトライしない
//! - 部分的な結果は返さない（成功か失敗のどちらか）

use async_trait::async_trait;
use bistro_domain::{Pageable, PageableData, filter::ListFilter, model::Listed, query};
use serde::de::DeserializeOwned;

use crate::{client_impl::ApiClient, error::ClientError, response::handle_response};

/// ページ取得の契約
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// 1 ページ分を取得する
    ///
    /// # 戻り値
    ///
    /// サーバーが返したページ。`pageable` はサーバーが正規化した値。
    async fn fetch_page(
        &self,
        pageable: &Pageable,
        filter: &ListFilter,
    ) -> Result<PageableData<T>, ClientError>;
}

#[async_trait]
impl<T> PageSource<T> for ApiClient
where
    T: Listed + DeserializeOwned,
{
    async fn fetch_page(
        &self,
        pageable: &Pageable,
        filter: &ListFilter,
    ) -> Result<PageableData<T>, ClientError> {
        let collection = T::COLLECTION;
        collection.validate(pageable)?;

        let params = query::encode(pageable, filter);
        let url = self.collection_url(collection, &params);
        tracing::debug!(%collection, query = %params.to_query_string(), "ページを取得します");

        let response = self.get(&url).send().await?;
        handle_response(response).await
    }
}
