//! # ライブ更新
//!
//! プッシュ通知を受信するたびに、保持しているページング要求で一覧を再取得する。
//! 表示中のページに関係なく無条件に再取得し、通知のペイロードは見ない。
//!
//! 購読はスコープ付きのリソースであり、[`close`](LiveSubscription::close) または
//! ハンドルの破棄で購読解除と接続のクローズが行われる。
//!
//! 受信エラーやサーバー側の切断で受信ループが終了した場合は、そのエラーを
//! 一覧同期の [`ErrorSink`](crate::ErrorSink) に転送し、
//! [`finished`](LiveSubscription::finished) で返す。再接続はしない。

use std::sync::Arc;

use futures::StreamExt;
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{error::ClientError, push::PushChannel, sync::ListSynchronizer};

/// ライブ更新の購読ハンドル
pub struct LiveSubscription {
    event:    String,
    shutdown: Option<oneshot::Sender<()>>,
    task:     Option<JoinHandle<Result<(), ClientError>>>,
}

impl LiveSubscription {
    /// 購読を開始する
    ///
    /// # エラー
    ///
    /// 接続に失敗した場合はそのエラーを返す（購読は開始されない）。
    pub async fn start<T>(
        synchronizer: Arc<ListSynchronizer<T>>,
        channel: &dyn PushChannel,
        event: &str,
    ) -> Result<Self, ClientError>
    where
        T: Send + 'static,
    {
        let mut events = channel.subscribe(event).await?;
        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
        let name = event.to_string();

        let task = tokio::spawn(async move {
            let err = loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        tracing::debug!(event = %name, "購読を解除します");
                        return Ok(());
                    }
                    next = events.next() => match next {
                        Some(Ok(_)) => {
                            tracing::debug!(event = %name, "更新通知を受信しました");
                            // 失敗は ErrorSink に転送済み
                            let _ = synchronizer.load().await;
                        }
                        Some(Err(err)) => break err,
                        None => {
                            break ClientError::Transport(
                                "プッシュ通知の接続が閉じられました".to_string(),
                            );
                        }
                    }
                }
            };
            tracing::warn!(
                event = %name,
                error.kind = err.kind(),
                "プッシュ通知の受信を終了しました: {}",
                err
            );
            synchronizer.report(&err);
            Err(err)
        });

        Ok(Self {
            event:    event.to_string(),
            shutdown: Some(shutdown),
            task:     Some(task),
        })
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// 受信ループが動作中か
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// 受信ループが終了するまで待つ
    ///
    /// 受信エラーやサーバー側の切断で終了した場合はそのエラーを返す。
    /// 終了を確認した後に再度呼ぶと、すぐに `Ok(())` を返す。
    pub async fn finished(&mut self) -> Result<(), ClientError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };
        let result = task.await;
        self.task = None;
        result.unwrap_or_else(|e| {
            Err(ClientError::Unexpected(format!("受信ループが異常終了しました: {e}")))
        })
    }

    /// 購読を解除し、受信ループの終了を待つ
    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
