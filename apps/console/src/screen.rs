//! # 一覧画面
//!
//! 1 つのコレクションの一覧を端末に描画する。
//!
//! ```text
//! == レビュー (5 / 20 ページ) ==
//! #7 2024-05-01 ★5 絶品 (tanaka)
//! #6 2024-04-28 ★3 普通
//!
//! 1 … 4 [5] 6 … 20
//! ```
//!
//! 総ページ数が 0 の場合は一覧とページ送りの代わりに空状態のメッセージを表示し、
//! 自動での再取得はしない。

use std::{fmt, fmt::Write as _, sync::Arc};

use bistro_client::{ClientError, ListSnapshot, ListSynchronizer, LoadOutcome, PageSource};
use bistro_domain::{
    Pageable,
    collection::Collection,
    filter::ListFilter,
    model::Listed,
    pagination::render_bar,
};

use crate::{
    cli::Command,
    notice::{Notice, NoticeSink},
};

/// 一覧画面
pub struct ListScreen<T> {
    collection: Collection,
    sync:       Arc<ListSynchronizer<T>>,
    notices:    Arc<NoticeSink>,
}

impl<T> ListScreen<T>
where
    T: Listed + fmt::Display + Clone,
{
    /// 画面をマウントする（まだ取得はしない）
    pub fn mount(source: Arc<dyn PageSource<T>>, pageable: Pageable, filter: ListFilter) -> Self {
        let notices = Arc::new(NoticeSink::new());
        let sync = Arc::new(ListSynchronizer::new(
            source,
            notices.clone(),
            pageable,
            filter,
        ));
        Self {
            collection: T::COLLECTION,
            sync,
            notices,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn synchronizer(&self) -> &Arc<ListSynchronizer<T>> {
        &self.sync
    }

    /// 保持しているページング要求で取得する
    pub async fn load(&self) -> Result<LoadOutcome, ClientError> {
        self.sync.load().await
    }

    /// 操作コマンドを実行する（`Quit` は何もしない）
    pub async fn apply(&self, command: Command) -> Option<Result<LoadOutcome, ClientError>> {
        match command {
            Command::Quit => None,
            Command::Reload => Some(self.sync.load().await),
            command => {
                let current = self.sync.pageable().await.current_page();
                let page = command.target_page(current)?;
                Some(self.sync.set_page(page).await)
            }
        }
    }

    /// 現在の状態を描画する
    ///
    /// 溜まっている通知はこの描画で消費される。
    pub async fn render(&self) -> String {
        let snapshot = self.sync.snapshot().await;
        render_screen(self.collection, &snapshot, self.notices.take())
    }
}

/// 一覧の見出し
pub fn title(collection: Collection) -> &'static str {
    match collection {
        Collection::Reservations => "予約",
        Collection::Reviews => "レビュー",
        Collection::Categories => "カテゴリ",
        Collection::Dishes => "料理",
        Collection::Orders => "注文",
        Collection::Users => "ユーザー",
    }
}

/// 空状態のメッセージ
pub fn empty_message(collection: Collection) -> &'static str {
    match collection {
        Collection::Reservations => "予約はまだありません。",
        Collection::Reviews => "レビューはまだありません。",
        Collection::Categories => "カテゴリが登録されていません。",
        Collection::Dishes => "料理が登録されていません。",
        Collection::Orders => "注文はまだありません。",
        Collection::Users => "ユーザーが登録されていません。",
    }
}

/// 状態のコピーと通知から画面を組み立てる
pub fn render_screen<T: fmt::Display>(
    collection: Collection,
    snapshot: &ListSnapshot<T>,
    notice: Option<Notice>,
) -> String {
    if let Some(notice) = notice
        && notice.is_full_screen()
    {
        return format!("!! {} !!\n", notice.message());
    }

    let mut screen = String::new();
    match snapshot.total {
        Some(total) if total > 0 => {
            let _ = writeln!(
                screen,
                "== {} ({} / {} ページ) ==",
                title(collection),
                u64::from(snapshot.pageable.current_page()) + 1,
                total
            );
        }
        _ => {
            let _ = writeln!(screen, "== {} ==", title(collection));
        }
    }

    if let Some(notice) = notice {
        let _ = writeln!(screen, "! {}", notice.message());
    }

    match snapshot.total {
        None => {}
        Some(0) => {
            let _ = writeln!(screen, "{}", empty_message(collection));
        }
        Some(_) => {
            for item in &snapshot.content {
                let _ = writeln!(screen, "{item}");
            }
            let _ = writeln!(screen);
            let _ = writeln!(screen, "{}", render_bar(&snapshot.controls()));
        }
    }

    screen
}
