//! # Bistro コンソール
//!
//! 一覧画面を 1 つマウントして端末に描画する。
//!
//! ## 環境変数
//!
//! 接続先は `.env` ファイルまたは環境変数で設定する。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BISTRO_API_URL` | **Yes** | REST API のベース URL |
//! | `BISTRO_PUSH_URL` | No | プッシュ通知の URL（`--follow` 時に必要） |
//! | `BISTRO_API_TOKEN` | No | Bearer トークン |
//! | `BISTRO_USER_ID` | No | 現在のユーザー ID |
//! | `BISTRO_USER_ROLE` | No | ロール（デフォルト: `customer`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 2 ページ目のレビューを日付の新しい順に表示
//! cargo run -p bistro-console -- reviews --page 2 --sort date,desc
//!
//! # 予約一覧を表示し、更新通知を受けて自動で再描画する
//! cargo run -p bistro-console -- reservations --follow --interactive
//! ```

use anyhow::Context as _;
use bistro_console::{cli::Cli, config::ConsoleConfig};
use bistro_shared::observability::{self, TracingConfig};
use clap::Parser;

/// コンソールのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. コマンドライン引数の解析
/// 3. トレーシングの初期化
/// 4. 設定の読み込み
/// 5. 一覧画面の実行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::from_env("console");
    if cli.verbose {
        tracing_config = tracing_config.with_default_directive("debug");
    }
    observability::init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "console").entered();

    let config = ConsoleConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::debug!(api_url = %config.api_url, role = %config.role, "設定を読み込みました");

    bistro_console::run(config, cli).await
}
