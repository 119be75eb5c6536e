//! # コマンドライン引数
//!
//! 一覧画面の初期状態（コレクション・ページング要求・フィルタ）と、
//! 起動後に受け付ける操作コマンドを定義する。

use std::num::NonZeroU32;

use bistro_domain::{
    DomainError,
    Pageable,
    collection::Collection,
    filter::ListFilter,
    model::CategoryId,
    pageable::SortToken,
    session::{Session, UserId},
};
use chrono::NaiveDate;
use clap::Parser;

/// レストランの一覧画面を端末に表示する
#[derive(Debug, Clone, Parser)]
#[command(name = "bistro-console", version)]
pub struct Cli {
    /// 表示する一覧（reservations, reviews, categories, dishes, orders, users）
    pub collection: Collection,

    /// 表示するページ（1 始まり）
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// 1 ページの件数
    #[arg(long)]
    pub size: Option<NonZeroU32>,

    /// ソート（例: `date,desc`）
    #[arg(long, value_name = "FIELD[,DIR]")]
    pub sort: Option<SortToken>,

    /// ルーティング層から渡されるクエリ文字列（例: `page=2&sort=date,desc`）
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// 期間の開始日（YYYY-MM-DD）
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// 期間の終了日（YYYY-MM-DD）
    #[arg(long)]
    pub to: Option<NaiveDate>,

    #[arg(long)]
    pub customer: Option<UserId>,

    #[arg(long)]
    pub category: Option<CategoryId>,

    /// 全文検索
    #[arg(long)]
    pub search: Option<String>,

    /// 予約の更新通知を受けて自動で再取得する
    #[arg(long)]
    pub follow: bool,

    /// 標準入力から操作コマンドを受け付ける
    #[arg(short, long)]
    pub interactive: bool,

    /// デバッグログを出力する（`RUST_LOG` が優先）
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 初期のページング要求
    ///
    /// コレクションのデフォルトに `--query` のヒント、個別の引数の順で上書きする。
    pub fn pageable(&self) -> Result<Pageable, DomainError> {
        let defaults = self.collection.default_pageable();
        let mut pageable = match &self.query {
            Some(query) => Pageable::from_query_hint(query, defaults)?,
            None => defaults,
        };

        if let Some(page) = self.page {
            pageable.page = Some(page - 1);
        }
        if let Some(size) = self.size {
            pageable.size = Some(size);
        }
        if let Some(sort) = &self.sort {
            pageable.set_sort_token(Some(sort.clone()));
        }

        self.collection.validate(&pageable)?;
        Ok(pageable)
    }

    /// 初期のフィルタ（セッションによる絞り込みを適用済み）
    pub fn filter(&self, session: Option<&Session>) -> Result<ListFilter, DomainError> {
        let mut filter = ListFilter::new().with_date_range(self.from, self.to)?;
        if let Some(customer) = self.customer {
            filter = filter.with_customer(customer);
        }
        if let Some(category) = self.category {
            filter = filter.with_category(category);
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search);
        }
        Ok(match session {
            Some(session) => filter.scoped_to(self.collection, session),
            None => filter,
        })
    }
}

/// 起動後の操作コマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    /// 指定ページへ移動（0 始まり）
    Goto(u32),
    Reload,
    Quit,
}

impl Command {
    /// 入力行を解釈する
    ///
    /// 数字はページ送りボタンのラベル（1 始まり）として扱う。
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" => Some(Self::Previous),
            "f" | "first" => Some(Self::First),
            "r" | "reload" => Some(Self::Reload),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other
                .parse::<u32>()
                .ok()
                .and_then(|label| label.checked_sub(1))
                .map(Self::Goto),
        }
    }

    /// 現在ページ `current` から見た遷移先（ページ移動でなければ `None`）
    pub fn target_page(self, current: u32) -> Option<u32> {
        match self {
            Self::Next => Some(current.saturating_add(1)),
            Self::Previous => Some(current.saturating_sub(1)),
            Self::First => Some(0),
            Self::Goto(page) => Some(page),
            Self::Reload | Self::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use bistro_domain::{SortOrder, session::Role};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bistro-console").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_引数なしならコレクションのデフォルト() {
        let cli = parse(&["reviews"]);

        assert_eq!(
            cli.pageable().unwrap(),
            Pageable::new().with_sort("date", SortOrder::Desc)
        );
    }

    #[test]
    fn test_個別の引数はクエリのヒントより優先する() {
        let cli = parse(&[
            "dishes",
            "--query",
            "page=4&size=5&sort=name,asc",
            "--page",
            "2",
            "--sort",
            "price,desc",
        ]);

        assert_eq!(
            cli.pageable().unwrap(),
            Pageable::new()
                .with_page(1)
                .with_size(NonZeroU32::new(5).unwrap())
                .with_sort("price", SortOrder::Desc)
        );
    }

    #[test]
    fn test_語彙外のソートはエラー() {
        let cli = parse(&["reviews", "--sort", "price"]);

        assert!(matches!(cli.pageable(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_ページは1始まりで0は受け付けない() {
        let result =
            Cli::try_parse_from(["bistro-console", "reviews", "--page", "0"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_不明なコレクションは受け付けない() {
        assert!(Cli::try_parse_from(["bistro-console", "wines"]).is_err());
    }

    #[test]
    fn test_来店客の予約一覧は自分に絞り込まれる() {
        let cli = parse(&["reservations", "--customer", "7", "--search", " pasta "]);
        let session = Session::new(UserId::new(42), Role::Customer);

        let filter = cli.filter(Some(&session)).unwrap();

        assert_eq!(filter.customer(), Some(UserId::new(42)));
        assert_eq!(filter.search(), Some("pasta"));
    }

    #[test]
    fn test_従業員は指定した客で絞り込める() {
        let cli = parse(&["reservations", "--customer", "7"]);
        let session = Session::new(UserId::new(1), Role::Employee);

        assert_eq!(
            cli.filter(Some(&session)).unwrap().customer(),
            Some(UserId::new(7))
        );
    }

    #[test]
    fn test_逆転した期間はエラー() {
        let cli = parse(&["orders", "--from", "2024-06-01", "--to", "2024-05-01"]);

        assert!(cli.filter(None).is_err());
    }

    #[rstest]
    #[case("n", Some(Command::Next))]
    #[case(" next ", Some(Command::Next))]
    #[case("p", Some(Command::Previous))]
    #[case("first", Some(Command::First))]
    #[case("r", Some(Command::Reload))]
    #[case("q", Some(Command::Quit))]
    #[case("5", Some(Command::Goto(4)))]
    #[case("0", None)]
    #[case("jump", None)]
    fn test_コマンドを解釈する(#[case] line: &str, #[case] expected: Option<Command>) {
        assert_eq!(Command::parse(line), expected);
    }

    #[rstest]
    #[case(Command::Next, 3, Some(4))]
    #[case(Command::Previous, 0, Some(0))]
    #[case(Command::Previous, 3, Some(2))]
    #[case(Command::First, 3, Some(0))]
    #[case(Command::Goto(9), 3, Some(9))]
    #[case(Command::Reload, 3, None)]
    fn test_遷移先のページ(
        #[case] command: Command,
        #[case] current: u32,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(command.target_page(current), expected);
    }
}
