/// サーバー採番の数値 ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ、JSON 上は数値のまま）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 既存の数値から ID を作成
/// - `as_i64()`: 内部の数値を取得
///
/// # 使用例
///
/// ```rust
/// use bistro_domain::session::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(i64);

        impl $Name {
            /// 既存の数値から ID を作成する
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の数値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::str::FromStr for $Name {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    $crate::DomainError::Validation(format!(
                        "{} は整数である必要があります: {:?}",
                        stringify!($Name),
                        s
                    ))
                })
            }
        }
    };
}
