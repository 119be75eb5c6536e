//! # コレクション
//!
//! ページング一覧を提供するバックエンドのコレクションと、その語彙。
//!
//! | コレクション | エンドポイント | ソート可能フィールド | デフォルト |
//! |---|---|---|---|
//! | reservations | `/reservations` | `startDate` | `startDate,desc` |
//! | reviews | `/reviews` | `date` | `date,desc` |
//! | categories | `/categories` | なし | size 20 固定 |
//! | dishes | `/dishes` | `name`, `price`, `discount` | なし |
//! | orders | `/orders` | `date` | `date,desc` |
//! | users | `/users` | `username` | なし |

use std::{num::NonZeroU32, str::FromStr};

use strum::IntoStaticStr;

use crate::{
    DomainError,
    pageable::{Pageable, SortOrder},
};

/// カテゴリ一覧の固定ページサイズ
pub const CATEGORY_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// ページング一覧を提供するコレクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Reservations,
    Reviews,
    Categories,
    Dishes,
    Orders,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Reservations,
        Collection::Reviews,
        Collection::Categories,
        Collection::Dishes,
        Collection::Orders,
        Collection::Users,
    ];

    /// ベース URL からの相対パス
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Reservations => "/reservations",
            Self::Reviews => "/reviews",
            Self::Categories => "/categories",
            Self::Dishes => "/dishes",
            Self::Orders => "/orders",
            Self::Users => "/users",
        }
    }

    /// ソート可能なフィールド名
    pub fn sort_fields(self) -> &'static [&'static str] {
        match self {
            Self::Reservations => &["startDate"],
            Self::Reviews => &["date"],
            Self::Categories => &[],
            Self::Dishes => &["name", "price", "discount"],
            Self::Orders => &["date"],
            Self::Users => &["username"],
        }
    }

    /// 固定ページサイズ（指定がなければ自由）
    pub fn fixed_page_size(self) -> Option<NonZeroU32> {
        match self {
            Self::Categories => Some(CATEGORY_PAGE_SIZE),
            _ => None,
        }
    }

    /// 一覧画面のマウント時に使う初期ページング要求
    pub fn default_pageable(self) -> Pageable {
        match self {
            Self::Reservations => Pageable::new().with_sort("startDate", SortOrder::Desc),
            Self::Reviews | Self::Orders => Pageable::new().with_sort("date", SortOrder::Desc),
            Self::Categories => Pageable::new().with_size(CATEGORY_PAGE_SIZE),
            Self::Dishes | Self::Users => Pageable::new(),
        }
    }

    /// `customer=<id>` フィルタの対象か（来店客が自分の分だけを見る一覧）
    pub fn is_customer_scoped(self) -> bool {
        matches!(self, Self::Reservations | Self::Orders)
    }

    /// ページング要求がこのコレクションの語彙に収まっているか検証する
    ///
    /// ページ番号の範囲はサーバーが正とするため検証しない。
    pub fn validate(self, pageable: &Pageable) -> Result<(), DomainError> {
        if let Some(sort) = &pageable.sort
            && !self.sort_fields().contains(&sort.as_str())
        {
            return Err(DomainError::Validation(format!(
                "{} はフィールド {:?} でソートできません（可能: {:?}）",
                self,
                sort,
                self.sort_fields()
            )));
        }

        if let (Some(fixed), Some(size)) = (self.fixed_page_size(), pageable.size)
            && fixed != size
        {
            return Err(DomainError::Validation(format!(
                "{} のページサイズは {} 固定です: {}",
                self, fixed, size
            )));
        }

        Ok(())
    }
}

impl FromStr for Collection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collection| {
                let name: &'static str = collection.into();
                name.eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| DomainError::Validation(format!("不明なコレクション: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Collection::Reservations, "startDate")]
    #[case(Collection::Reviews, "date")]
    #[case(Collection::Orders, "date")]
    fn test_デフォルトは降順ソート(#[case] collection: Collection, #[case] field: &str) {
        let pageable = collection.default_pageable();

        assert_eq!(pageable.sort.as_deref(), Some(field));
        assert_eq!(pageable.order, Some(SortOrder::Desc));
        assert_eq!(collection.validate(&pageable), Ok(()));
    }

    #[test]
    fn test_カテゴリはソートなしでサイズ20() {
        let pageable = Collection::Categories.default_pageable();

        assert_eq!(pageable.sort, None);
        assert_eq!(pageable.size.map(NonZeroU32::get), Some(20));
    }

    #[test]
    fn test_語彙にないソートフィールドはバリデーションエラー() {
        let pageable = Pageable::new().with_sort("rating", SortOrder::Asc);

        assert!(matches!(
            Collection::Dishes.validate(&pageable),
            Err(DomainError::Validation(_))
        ));
        let sorted = Pageable::new().with_sort("name", SortOrder::Asc);
        assert!(Collection::Categories.validate(&sorted).is_err());
    }

    #[test]
    fn test_料理は3つのフィールドでソートできる() {
        for field in ["name", "price", "discount"] {
            let pageable = Pageable::new().with_sort(field, SortOrder::Asc);
            assert_eq!(Collection::Dishes.validate(&pageable), Ok(()));
        }
    }

    #[test]
    fn test_カテゴリのページサイズ変更はバリデーションエラー() {
        let pageable = Pageable::new().with_size(NonZeroU32::new(50).unwrap());

        assert!(Collection::Categories.validate(&pageable).is_err());
        assert_eq!(Collection::Dishes.validate(&pageable), Ok(()));
    }

    #[test]
    fn test_名前からコレクションをパースする() {
        assert_eq!("Reviews".parse::<Collection>(), Ok(Collection::Reviews));
        assert_eq!(Collection::Reviews.to_string(), "reviews");
        assert!("menus".parse::<Collection>().is_err());
    }
}
