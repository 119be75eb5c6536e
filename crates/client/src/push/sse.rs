//! `text/event-stream` のインクリメンタルデコーダ
//!
//! 受信チャンクは行の途中や UTF-8 の文字の途中で分割されうるため、
//! 改行までをバイト列のまま溜めてから解釈する。
//! 改行のないまま [`MAX_LINE_BYTES`] を超えた場合はストリームの異常として扱う。

use super::PushEvent;
use crate::error::ClientError;

/// イベント名が省略されたフレームの名前
const DEFAULT_EVENT: &str = "message";

/// 1 行として溜めておけるバイト数の上限
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// `text/event-stream` のデコーダ
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    event:   Option<String>,
    data:    Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// チャンクを投入し、完成したイベントを返す
    ///
    /// # エラー
    ///
    /// 改行を含まない行が [`MAX_LINE_BYTES`] を超えた場合は `ClientError::Unexpected` を返し、
    /// 溜めていたバイト列を破棄する。
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<PushEvent>, ClientError> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            if let Some(event) = self.process_line(line.trim_end_matches(['\n', '\r'])) {
                events.push(event);
            }
        }

        if self.pending.len() > MAX_LINE_BYTES {
            let len = self.pending.len();
            self.pending.clear();
            return Err(ClientError::Unexpected(format!(
                "プッシュ通知の行が長すぎます（{len} バイト）"
            )));
        }
        Ok(events)
    }

    fn process_line(&mut self, line: &str) -> Option<PushEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id / retry は再接続しないので使わない
            _ => {}
        }
        None
    }

    /// 空行でフレームを確定する
    ///
    /// ペイロードを使わないため、`data` がなくてもイベント名があれば通知する。
    fn dispatch(&mut self) -> Option<PushEvent> {
        let name = self.event.take();
        if name.is_none() && self.data.is_empty() {
            return None;
        }
        Some(PushEvent {
            name: name.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn event(name: &str, data: &str) -> PushEvent {
        PushEvent {
            name: name.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_空行でイベントを確定する() {
        let mut decoder = SseDecoder::new();

        let events = decoder
            .feed(b"event: reservations\ndata: {\"id\":1}\n\n")
            .unwrap();

        assert_eq!(events, vec![event("reservations", "{\"id\":1}")]);
    }

    #[test]
    fn test_行の途中で分割されたチャンクをつなげる() {
        let mut decoder = SseDecoder::new();

        assert!(decoder.feed(b"event: reser").unwrap().is_empty());
        assert!(decoder.feed(b"vations\r\ndata: a\r\n").unwrap().is_empty());
        let events = decoder.feed(b"data: b\r\n\r\n").unwrap();

        assert_eq!(events, vec![event("reservations", "a\nb")]);
    }

    #[test]
    fn test_マルチバイト文字の途中で分割されても壊れない() {
        let mut decoder = SseDecoder::new();
        let payload = "data: 予約\n\n".as_bytes();
        let (head, tail) = payload.split_at(8);

        let mut events = decoder.feed(head).unwrap();
        events.extend(decoder.feed(tail).unwrap());

        assert_eq!(events, vec![event("message", "予約")]);
    }

    #[test]
    fn test_コメントと未知のフィールドは無視する() {
        let mut decoder = SseDecoder::new();

        let events = decoder
            .feed(b": keep-alive\nid: 3\nretry: 1000\n\nevent: reservations\n\n")
            .unwrap();

        assert_eq!(events, vec![event("reservations", "")]);
    }

    #[test]
    fn test_改行のない長すぎる行はエラーにする() {
        let mut decoder = SseDecoder::new();

        assert!(decoder.feed(&[b'a'; MAX_LINE_BYTES]).unwrap().is_empty());
        let result = decoder.feed(b"a");

        assert!(matches!(result, Err(ClientError::Unexpected(_))));
        // 破棄後は続きのフレームを読める
        let events = decoder.feed(b"event: reservations\n\n").unwrap();
        assert_eq!(events, vec![event("reservations", "")]);
    }
}
