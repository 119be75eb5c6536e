//! # ドメイン層エラー定義
//!
//! ページング要求やフィルタの組み立て時に検出される不正値を表現する。
//!
//! クライアント層はこのエラーを受け取り、リクエストを送信する前に
//! `ClientError::Validation` として呼び出し元へ返す。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// ページ番号・ページサイズ・ソートトークン・フィルタが
    /// 取りうる値の範囲を外れている場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
