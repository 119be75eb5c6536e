//! # 画面の実行
//!
//! 起動引数のコレクションに対応する一覧画面を 1 つマウントし、描画する。
//!
//! - `--follow`: 予約の更新通知を購読し、受信のたびに再取得・再描画する
//! - `--interactive`: 標準入力からページ送りのコマンドを受け付ける
//!
//! どちらも指定しなければ 1 回取得して描画し、終了する。
//!
//! 更新通知の受信が途絶えた場合は通知を描画し、`--interactive` がなければ終了する。

use std::{fmt, sync::Arc};

use anyhow::{Context as _, bail};
use bistro_client::{
    ApiClient, ClientError, EventStreamChannel, LiveSubscription, RESERVATIONS_EVENT,
};
use bistro_domain::{
    collection::Collection,
    model::{Category, Dish, Listed, Order, Reservation, Review, User},
    session::Role,
};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::{
    cli::{Cli, Command},
    config::ConsoleConfig,
    screen::ListScreen,
};

/// コンソールを実行する
pub async fn run(config: ConsoleConfig, cli: Cli) -> anyhow::Result<()> {
    match cli.collection {
        Collection::Reservations => run_screen::<Reservation>(&config, &cli).await,
        Collection::Reviews => run_screen::<Review>(&config, &cli).await,
        Collection::Categories => run_screen::<Category>(&config, &cli).await,
        Collection::Dishes => run_screen::<Dish>(&config, &cli).await,
        Collection::Orders => run_screen::<Order>(&config, &cli).await,
        Collection::Users => run_screen::<User>(&config, &cli).await,
    }
}

/// 設定と引数から一覧画面をマウントする
pub fn mount<T>(config: &ConsoleConfig, cli: &Cli) -> anyhow::Result<ListScreen<T>>
where
    T: Listed + DeserializeOwned + fmt::Display + Clone,
{
    let session = config.session();
    if session.is_none() && config.role == Role::Customer && cli.collection.is_customer_scoped() {
        bail!(
            "{} を来店客として表示するには BISTRO_USER_ID が必要です",
            cli.collection
        );
    }

    let mut client = ApiClient::new(&config.api_url)?;
    if let Some(token) = &config.api_token {
        client = client.with_bearer_token(token.clone());
    }

    let pageable = cli.pageable().context("ページング要求が不正です")?;
    let filter = cli
        .filter(session.as_ref())
        .context("絞り込み条件が不正です")?;

    tracing::info!(
        collection = %cli.collection,
        page = ?pageable.page,
        "一覧画面をマウントします"
    );
    Ok(ListScreen::mount(Arc::new(client), pageable, filter))
}

async fn run_screen<T>(config: &ConsoleConfig, cli: &Cli) -> anyhow::Result<()>
where
    T: Listed + DeserializeOwned + fmt::Display + Clone,
{
    let screen = mount::<T>(config, cli)?;
    let mut out = tokio::io::stdout();

    let first = screen.load().await;
    draw(&mut out, &screen).await?;

    if !cli.follow && !cli.interactive {
        first.context("一覧の取得に失敗しました")?;
        return Ok(());
    }

    let mut subscription = if cli.follow {
        Some(follow(config, &screen).await?)
    } else {
        None
    };

    let result = event_loop(&mut out, &screen, &mut subscription, cli.interactive).await;

    if let Some(subscription) = subscription {
        subscription.close().await;
    }
    result
}

/// 予約の更新通知を購読する
async fn follow<T>(
    config: &ConsoleConfig,
    screen: &ListScreen<T>,
) -> anyhow::Result<LiveSubscription>
where
    T: Listed + DeserializeOwned + fmt::Display + Clone,
{
    if screen.collection() != Collection::Reservations {
        bail!("--follow は reservations でのみ使用できます");
    }
    let Some(push_url) = &config.push_url else {
        bail!("--follow には BISTRO_PUSH_URL が必要です");
    };

    let mut channel = EventStreamChannel::new(push_url)?;
    if let Some(token) = &config.api_token {
        channel = channel.with_bearer_token(token.clone());
    }

    let subscription =
        LiveSubscription::start(screen.synchronizer().clone(), &channel, RESERVATIONS_EVENT)
            .await
            .context("更新通知の購読に失敗しました")?;
    Ok(subscription)
}

/// 状態の更新・入力・更新通知の終了・Ctrl-C を待ち受ける
///
/// 取得の成否はどちらも `changes` で通知されるので、描画はそこで行う。
async fn event_loop<T, W>(
    out: &mut W,
    screen: &ListScreen<T>,
    subscription: &mut Option<LiveSubscription>,
    interactive: bool,
) -> anyhow::Result<()>
where
    T: Listed + DeserializeOwned + fmt::Display + Clone,
    W: AsyncWrite + Unpin,
{
    let mut changes = screen.synchronizer().changes();
    let mut input = interactive.then(|| BufReader::new(tokio::io::stdin()).lines());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(out, screen).await?;
            }
            ended = live_finished(subscription) => {
                *subscription = None;
                if let Err(err) = ended
                    && !interactive
                {
                    draw(out, screen).await?;
                    return Err(err).context("更新通知の受信が途絶えました");
                }
            }
            line = next_line(&mut input) => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    tracing::debug!(%line, "不明なコマンドです");
                    continue;
                };
                if screen.apply(command).await.is_none() {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// 入力を受け付けない場合は永久に待つ
async fn next_line(
    input: &mut Option<Lines<BufReader<Stdin>>>,
) -> std::io::Result<Option<String>> {
    match input {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

/// 購読していない場合は永久に待つ
async fn live_finished(subscription: &mut Option<LiveSubscription>) -> Result<(), ClientError> {
    match subscription {
        Some(subscription) => subscription.finished().await,
        None => std::future::pending().await,
    }
}

async fn draw<T, W>(out: &mut W, screen: &ListScreen<T>) -> anyhow::Result<()>
where
    T: Listed + DeserializeOwned + fmt::Display + Clone,
    W: AsyncWrite + Unpin,
{
    let rendered = screen.render().await;
    out.write_all(rendered.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
