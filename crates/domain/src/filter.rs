//! # 一覧フィルタ
//!
//! ページング要求と一緒に送るドメイン固有の絞り込み条件。
//!
//! クエリパラメータとしては `from`, `to`, `customer`, `category`, `search` の順で
//! 出力し、値のない条件は送信しない。

use chrono::NaiveDate;

use crate::{
    DomainError,
    collection::Collection,
    model::CategoryId,
    query::QueryParams,
    session::{Session, UserId},
};

/// 一覧フィルタ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    from:     Option<NaiveDate>,
    to:       Option<NaiveDate>,
    customer: Option<UserId>,
    category: Option<CategoryId>,
    search:   Option<String>,
}

impl ListFilter {
    /// 条件なしのフィルタを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 日付範囲を設定する
    ///
    /// # エラー
    ///
    /// 両端が指定されていて `from > to` の場合は `DomainError::Validation` を返す。
    pub fn with_date_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(DomainError::Validation(format!(
                "日付範囲が逆転しています: {} > {}",
                from, to
            )));
        }
        self.from = from;
        self.to = to;
        Ok(self)
    }

    pub fn with_customer(mut self, customer: UserId) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// 全文検索語を設定する（前後の空白を除去し、空なら未指定扱い）
    pub fn with_search(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    /// セッションのロールに応じて絞り込みを強制する
    ///
    /// 来店客が自分専用の一覧（予約・注文）を開く場合、`customer` は
    /// 常にセッションのユーザー ID で上書きされる。
    pub fn scoped_to(mut self, collection: Collection, session: &Session) -> Self {
        if session.is_customer() && collection.is_customer_scoped() {
            self.customer = Some(session.user_id);
        }
        self
    }

    pub fn customer(&self) -> Option<UserId> {
        self.customer
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// クエリパラメータに追記する
    pub fn append_to(&self, params: &mut QueryParams) {
        if let Some(from) = self.from {
            params.push("from", from.to_string());
        }
        if let Some(to) = self.to {
            params.push("to", to.to_string());
        }
        if let Some(customer) = self.customer {
            params.push("customer", customer.to_string());
        }
        if let Some(category) = self.category {
            params.push("category", category.to_string());
        }
        if let Some(search) = &self.search {
            params.push("search", search.clone());
        }
    }
}
