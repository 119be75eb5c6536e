//! # 一覧 DTO
//!
//! 各コレクションのページに含まれる要素の形。JSON のフィールド名は camelCase。
//!
//! 要素型は [`Listed`] を実装することで取得先のコレクションと結び付く。
//! クライアント層はこの関連付けを使って、要素型だけからエンドポイントと
//! ソート語彙を決定する。
//!
//! `Display` は一覧の 1 行表示に使う。

use crate::collection::Collection;

mod category;
mod dish;
mod order;
mod reservation;
mod review;
mod user;

pub use category::{Category, CategoryId};
pub use dish::{Dish, DishId};
pub use order::{Order, OrderId};
pub use reservation::{Reservation, ReservationId};
pub use review::{Review, ReviewId};
pub use user::User;

/// ページング一覧の要素型
pub trait Listed: Send + Sync + 'static {
    /// 要素を提供するコレクション
    const COLLECTION: Collection;
}
