//! # 一覧同期
//!
//! 一覧画面ごとに 1 つ持つ状態コンテナ。ページング要求・表示中のページ・総ページ数を保持し、
//! [`load`](ListSynchronizer::load) / [`set_page`](ListSynchronizer::set_page) /
//! [`set_filter`](ListSynchronizer::set_filter) だけが状態を更新する。
//!
//! ## 状態の調停
//!
//! 1. 取得成功時、保持する `Pageable` はサーバーが返した値で丸ごと置き換える
//! 2. 取得失敗時、表示中のページとページング要求は取得前のまま残し、
//!    エラーを [`ErrorSink`] に転送する
//! 3. リトライはしない
//!
//! `set_page` / `set_filter` で指定した値は応答を待つ間だけ「次に送る要求」として保持し、
//! 表示中の状態（[`snapshot`](ListSynchronizer::snapshot)）には応答の適用時に反映する。
//!
//! ## 競合
//!
//! ユーザー操作とプッシュ通知の両方が `load` を発行しうる。
//! 発行時に単調増加のシーケンス番号を採番し、完了したレスポンスは
//! その番号が発行済みの最大値である場合にのみ適用する。
//! それより古いレスポンスは到着順に関係なく破棄する。
//!
//! 状態のロックはネットワーク待ちの間は保持しない。

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use bistro_domain::{
    Pageable,
    filter::ListFilter,
    pagination::{PageControl, render_controls},
};
use tokio::sync::{Mutex, watch};

use crate::{error::ClientError, source::PageSource};

/// エラーの転送先
///
/// 同期処理はエラーから回復しない。表示方法の判断は転送先が行う。
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &ClientError);

    /// 最新の要求の応答を適用したときに呼ばれる
    fn resolved(&self) {}
}

/// ログに出力するだけの転送先
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, error: &ClientError) {
        tracing::warn!(error.kind = error.kind(), "一覧の取得に失敗しました: {}", error);
    }
}

/// `load` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// レスポンスを状態に適用した
    Applied { seq: u64 },
    /// より新しい要求が発行済みのため破棄した
    Superseded { seq: u64, latest: u64 },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// 一覧の状態のコピー
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub pageable: Pageable,
    pub filter:   ListFilter,
    pub content:  Vec<T>,
    /// 総ページ数（一度も取得に成功していなければ `None`）
    pub total:    Option<u64>,
}

impl<T> ListSnapshot<T> {
    /// 取得に成功し、かつ一覧が空か
    pub fn is_empty(&self) -> bool {
        self.total == Some(0)
    }

    /// ページ送りボタン（未取得または空の一覧では描画しない）
    pub fn controls(&self) -> Vec<PageControl> {
        visible_controls(self.total, &self.pageable)
    }
}

fn visible_controls(total: Option<u64>, pageable: &Pageable) -> Vec<PageControl> {
    match total {
        Some(total) if total > 0 => render_controls(total, u64::from(pageable.current_page())),
        _ => Vec::new(),
    }
}

/// ページング要求とフィルタの組
#[derive(Debug, Clone)]
struct Criteria {
    pageable: Pageable,
    filter:   ListFilter,
}

struct ListState<T> {
    /// 次に送る要求
    requested: Criteria,
    /// 表示中の一覧に対応する要求
    shown:     Criteria,
    content:   Vec<T>,
    total:     Option<u64>,
}

/// 発行済みの 1 回分の要求
struct Request {
    seq:      u64,
    criteria: Criteria,
}

/// 一覧同期
pub struct ListSynchronizer<T> {
    source:  Arc<dyn PageSource<T>>,
    sink:    Arc<dyn ErrorSink>,
    issued:  AtomicU64,
    state:   Mutex<ListState<T>>,
    settled: watch::Sender<u64>,
}

impl<T: Send + 'static> ListSynchronizer<T> {
    /// 一覧画面のマウント時に作成する
    ///
    /// `pageable` はコレクションのデフォルト、またはルーティング層のヒント。
    pub fn new(
        source: Arc<dyn PageSource<T>>,
        sink: Arc<dyn ErrorSink>,
        pageable: Pageable,
        filter: ListFilter,
    ) -> Self {
        Self {
            source,
            sink,
            issued: AtomicU64::new(0),
            state: Mutex::new(ListState {
                requested: Criteria {
                    pageable: pageable.clone(),
                    filter:   filter.clone(),
                },
                shown: Criteria { pageable, filter },
                content: Vec::new(),
                total: None,
            }),
            settled: watch::Sender::new(0),
        }
    }

    /// 保持しているページング要求で再取得する
    pub async fn load(&self) -> Result<LoadOutcome, ClientError> {
        let request = {
            let state = self.state.lock().await;
            self.issue(&state)
        };
        self.fetch_and_apply(request).await
    }

    /// ページを移動して取得する
    ///
    /// 範囲の検証はしない（サーバーが丸めるか拒否する）。
    /// 表示中と同じページを指定しても再取得する。
    pub async fn set_page(&self, page: u32) -> Result<LoadOutcome, ClientError> {
        let request = {
            let mut state = self.state.lock().await;
            state.requested.pageable.page = Some(page);
            self.issue(&state)
        };
        self.fetch_and_apply(request).await
    }

    /// フィルタを差し替え、先頭ページから取得する
    pub async fn set_filter(&self, filter: ListFilter) -> Result<LoadOutcome, ClientError> {
        let request = {
            let mut state = self.state.lock().await;
            state.requested.filter = filter;
            state.requested.pageable.page = Some(0);
            self.issue(&state)
        };
        self.fetch_and_apply(request).await
    }

    /// 表示中の一覧のページング要求
    pub async fn pageable(&self) -> Pageable {
        self.state.lock().await.shown.pageable.clone()
    }

    /// 現在のページ送りボタン
    pub async fn controls(&self) -> Vec<PageControl> {
        let state = self.state.lock().await;
        visible_controls(state.total, &state.shown.pageable)
    }

    /// 状態の更新通知を購読する
    ///
    /// 最新の要求が確定する（応答を適用する、または失敗する）たびに通知される。
    /// 値はその要求のシーケンス番号（未確定なら 0）。破棄した古い応答では通知しない。
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.settled.subscribe()
    }

    /// 取得以外の失敗（プッシュ通知の切断など）を転送し、画面に通知する
    pub fn report(&self, error: &ClientError) {
        self.sink.report(error);
        self.settled.send_modify(|_| {});
    }

    /// 発行済みのシーケンス番号の最大値
    pub fn latest_seq(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// 状態のロック中に採番し、送信内容を確定する
    fn issue(&self, state: &ListState<T>) -> Request {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Request {
            seq,
            criteria: state.requested.clone(),
        }
    }

    async fn fetch_and_apply(&self, request: Request) -> Result<LoadOutcome, ClientError> {
        let Request { seq, criteria } = request;
        tracing::debug!(seq, page = ?criteria.pageable.page, "一覧を取得します");

        let result = self
            .source
            .fetch_page(&criteria.pageable, &criteria.filter)
            .await;

        let mut state = self.state.lock().await;
        let latest = self.issued.load(Ordering::SeqCst);

        match result {
            Ok(data) if seq == latest => {
                let shown = Criteria {
                    pageable: data.pageable,
                    filter:   criteria.filter,
                };
                state.requested = shown.clone();
                state.shown = shown;
                state.content = data.content;
                state.total = Some(data.total);
                drop(state);
                self.sink.resolved();
                self.settled.send_replace(seq);
                tracing::debug!(seq, total = data.total, "一覧を更新しました");
                Ok(LoadOutcome::Applied { seq })
            }
            Ok(_) => {
                tracing::debug!(seq, latest, "古いレスポンスを破棄しました");
                Ok(LoadOutcome::Superseded { seq, latest })
            }
            Err(err) if seq == latest => {
                // 要求したページ・フィルタは採用せず、表示中のものに戻す
                state.requested = state.shown.clone();
                drop(state);
                self.sink.report(&err);
                self.settled.send_replace(seq);
                Err(err)
            }
            Err(err) => {
                drop(state);
                tracing::debug!(
                    seq,
                    latest,
                    error.kind = err.kind(),
                    "古い要求の失敗を無視しました"
                );
                Err(err)
            }
        }
    }
}

impl<T: Clone + Send + 'static> ListSynchronizer<T> {
    /// 状態のコピーを取得する
    pub async fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.state.lock().await;
        ListSnapshot {
            pageable: state.shown.pageable.clone(),
            filter:   state.shown.filter.clone(),
            content:  state.content.clone(),
            total:    state.total,
        }
    }
}
