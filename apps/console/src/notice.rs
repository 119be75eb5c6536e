//! # エラー通知
//!
//! 一覧同期から転送された [`ClientError`] を画面上の通知に変換する。
//!
//! - 401 / 403 / 404 は一覧の代わりに全画面の通知を表示する
//! - それ以外は一覧を残したまま汎用の失敗通知を表示する

use std::sync::Mutex;

use bistro_client::{ClientError, ErrorSink};

/// 画面に表示する通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// セッション切れ（401）
    SessionExpired,
    /// 権限不足（403）
    AccessDenied,
    /// 参照先なし（404）
    NotFound,
    /// その他の失敗
    GenericFailure,
}

impl Notice {
    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Unauthorized(_) => Self::SessionExpired,
            ClientError::Forbidden(_) => Self::AccessDenied,
            ClientError::NotFound(_) => Self::NotFound,
            ClientError::Transport(_)
            | ClientError::Validation(_)
            | ClientError::Server { .. }
            | ClientError::Unexpected(_) => Self::GenericFailure,
        }
    }

    /// 一覧を隠して全画面で表示するか
    pub fn is_full_screen(self) -> bool {
        !matches!(self, Self::GenericFailure)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::SessionExpired => "セッションの有効期限が切れました。再度ログインしてください。",
            Self::AccessDenied => "この一覧を表示する権限がありません。",
            Self::NotFound => "お探しの一覧は見つかりませんでした。",
            Self::GenericFailure => {
                "一覧を読み込めませんでした。時間をおいて再度お試しください。"
            }
        }
    }
}

/// 通知を溜めておくエラー転送先
///
/// 画面は描画のたびに [`take`](NoticeSink::take) で最新の通知を取り出す。
/// 表示前に最新の要求が成功した場合、その通知は取り下げる。
#[derive(Debug, Default)]
pub struct NoticeSink {
    pending: Mutex<Option<Notice>>,
}

impl NoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未表示の通知を取り出す
    pub fn take(&self) -> Option<Notice> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }
}

impl ErrorSink for NoticeSink {
    fn report(&self, error: &ClientError) {
        let notice = Notice::from_error(error);
        tracing::warn!(
            error.kind = error.kind(),
            ?notice,
            "一覧の取得に失敗しました: {}",
            error
        );
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(notice);
        }
    }

    fn resolved(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.take();
        }
    }
}
