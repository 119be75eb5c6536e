//! # Bistro コンソール
//!
//! レストランの一覧画面（予約・レビュー・料理・カテゴリ・注文・ユーザー）を
//! 端末に描画するクライアント。
//!
//! ## モジュール構成
//!
//! - `app`: 一覧画面のマウントと実行ループ
//! - `cli`: コマンドライン引数と操作コマンド
//! - `config`: 環境変数からの設定読み込み
//! - `notice`: エラーから画面通知への振り分け
//! - `screen`: 一覧・ページ送り・空状態の描画

pub mod app;
pub mod cli;
pub mod config;
pub mod notice;
pub mod screen;

pub use app::run;
