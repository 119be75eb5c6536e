//! # Bistro API クライアント
//!
//! 一覧画面とバックエンドの間のページング同期を担当する。
//!
//! ## モジュール構成
//!
//! - [`client_impl`] - REST API クライアント
//! - [`source`] - ページ取得の契約（[`PageSource`]）
//! - [`sync`] - 一覧ごとの状態コンテナと競合の調停
//! - [`push`] - プッシュ通知チャネル
//! - [`live`] - プッシュ通知による自動再取得
//! - [`error`] - クライアントエラー
//!
//! ## 使用例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bistro_client::{ApiClient, ListSynchronizer, LogSink};
//! use bistro_domain::{collection::Collection, filter::ListFilter, model::Review};
//!
//! # async fn run() -> Result<(), bistro_client::ClientError> {
//! let client = ApiClient::new("http://localhost:8080/api")?;
//! let reviews: ListSynchronizer<Review> = ListSynchronizer::new(
//!     Arc::new(client),
//!     Arc::new(LogSink),
//!     Collection::Reviews.default_pageable(),
//!     ListFilter::new(),
//! );
//! reviews.load().await?;
//! reviews.set_page(2).await?;
//! # Ok(())
//! # }
//! ```

pub mod client_impl;
pub mod error;
pub mod live;
pub mod push;
mod response;
pub mod source;
pub mod sync;

pub use client_impl::ApiClient;
pub use error::ClientError;
pub use live::LiveSubscription;
pub use push::{EventStream, EventStreamChannel, PushChannel, PushEvent, RESERVATIONS_EVENT};
pub use source::PageSource;
pub use sync::{ErrorSink, ListSnapshot, ListSynchronizer, LoadOutcome, LogSink};
