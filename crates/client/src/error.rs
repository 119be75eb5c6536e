//! クライアントのエラー型
//!
//! 原因ごとに閉じた列挙型で表現し、呼び出し側は `match` で振り分ける。

use bistro_domain::DomainError;
use thiserror::Error;

/// クライアントエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// ネットワークに到達できない、接続が切れた
    #[error("ネットワークエラー: {0}")]
    Transport(String),

    /// セッションが無効（401）
    #[error("認証が必要です: {0}")]
    Unauthorized(String),

    /// 権限不足（403）
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 参照先が存在しない（404）
    #[error("見つかりません: {0}")]
    NotFound(String),

    /// ページング・フィルタの値が不正（400、または送信前の検証）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// サーバーエラー（5xx）
    #[error("サーバーエラー {status}: {body}")]
    Server { status: u16, body: String },

    /// 予期しないステータス、または解釈できない成功レスポンス
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// ログの `error.kind` に出力する分類名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Server { .. } => "server",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Unexpected(format!("レスポンスを解釈できません: {}", err))
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(detail) => ClientError::Validation(detail),
        }
    }
}
