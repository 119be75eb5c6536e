//! # Bistro ドメイン層
//!
//! レストラン予約・注文システムの一覧画面が共有するページングプロトコルの型と、
//! そのクエリ表現・ページネーション表示ロジックを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! console → client → domain
//! ```
//!
//! ドメイン層は HTTP や非同期ランタイムに依存しない。
//!
//! ## モジュール構成
//!
//! - [`pageable`] - ページング要求・レスポンスとソートトークン
//! - [`query`] - クエリパラメータとの相互変換
//! - [`collection`] - コレクションごとのエンドポイントとソート語彙
//! - [`filter`] - ドメイン固有の絞り込み条件
//! - [`session`] - 現在のユーザーとロール
//! - [`pagination`] - ページ送りボタンの算出
//! - [`model`] - 一覧の要素 DTO
//!
//! ## 使用例
//!
//! ```rust
//! use bistro_domain::{collection::Collection, filter::ListFilter, query};
//!
//! let pageable = Collection::Reviews.default_pageable().with_page(1);
//! let params = query::encode(&pageable, &ListFilter::new());
//! assert_eq!(params.to_query_string(), "page=1&sort=date,desc");
//! ```

#[macro_use]
mod macros;

pub mod collection;
pub mod error;
pub mod filter;
pub mod model;
pub mod pageable;
pub mod pagination;
pub mod query;
pub mod session;

pub use error::DomainError;
pub use pageable::{Pageable, PageableData, SortOrder};
