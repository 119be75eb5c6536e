//! `text/event-stream` によるプッシュ通知チャネル

use async_trait::async_trait;
use futures::{StreamExt, future, stream};
use reqwest::header::ACCEPT;

use super::{EventStream, PushChannel, PushEvent, SseDecoder};
use crate::{error::ClientError, response::error_from_status};

/// `text/event-stream` によるプッシュ通知チャネル
///
/// 購読ごとに 1 本の持続的な接続を張り、購読したイベント名のフレームだけを流す。
#[derive(Clone)]
pub struct EventStreamChannel {
    url:          String,
    client:       reqwest::Client,
    bearer_token: Option<String>,
}

impl EventStreamChannel {
    /// 新しいチャネルを作成する
    ///
    /// # エラー
    ///
    /// URL として解釈できない場合は `ClientError::Validation` を返す。
    pub fn new(url: &str) -> Result<Self, ClientError> {
        url::Url::parse(url).map_err(|e| {
            ClientError::Validation(format!("プッシュ通知の URL が不正です: {url:?} ({e})"))
        })?;

        Ok(Self {
            url:          url.to_string(),
            client:       reqwest::Client::new(),
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl PushChannel for EventStreamChannel {
    async fn subscribe(&self, event: &str) -> Result<EventStream, ClientError> {
        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status, body));
        }
        tracing::info!(url = %self.url, event, "プッシュ通知を購読しました");

        let wanted = event.to_string();
        let mut decoder = SseDecoder::new();
        let events = response
            .bytes_stream()
            .flat_map(move |chunk| {
                let items: Vec<Result<PushEvent, ClientError>> = match chunk {
                    Ok(bytes) => match decoder.feed(&bytes) {
                        Ok(events) => events.into_iter().map(Ok).collect(),
                        Err(err) => vec![Err(err)],
                    },
                    Err(err) => vec![Err(ClientError::from(err))],
                };
                stream::iter(items)
            })
            .filter(move |item| {
                future::ready(match item {
                    Ok(event) => event.name == wanted,
                    Err(_) => true,
                })
            })
            .boxed();

        Ok(events)
    }
}
