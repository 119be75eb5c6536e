//! # プッシュ通知チャネル
//!
//! サーバーからの無効化通知を受け取る持続的な接続。
//! 受信したイベントのペイロードは使わず、受信したこと自体を再取得のきっかけにする。

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ClientError;

mod event_stream;
mod sse;

pub use event_stream::EventStreamChannel;
pub use sse::SseDecoder;

/// 予約一覧の更新通知のイベント名
pub const RESERVATIONS_EVENT: &str = "reservations";

/// 受信したイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    pub name: String,
    pub data: String,
}

/// 購読中のイベント列
///
/// ストリームを破棄すると購読解除と接続のクローズが行われる。
pub type EventStream = BoxStream<'static, Result<PushEvent, ClientError>>;

/// プッシュ通知チャネル
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// `event` という名前のイベントを購読する
    async fn subscribe(&self, event: &str) -> Result<EventStream, ClientError>;
}
