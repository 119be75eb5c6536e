//! # コンソール設定
//!
//! 環境変数からコンソールの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BISTRO_API_URL` | **Yes** | REST API のベース URL |
//! | `BISTRO_PUSH_URL` | No | プッシュ通知（`text/event-stream`）の URL |
//! | `BISTRO_API_TOKEN` | No | リクエストに付与する Bearer トークン |
//! | `BISTRO_USER_ID` | No | 現在のユーザー ID |
//! | `BISTRO_USER_ROLE` | No | `customer` / `employee` / `admin`（デフォルト: `customer`） |

use std::env;

use bistro_domain::session::{Role, Session, UserId};
use thiserror::Error;

/// 設定の読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} が設定されていません（.env を確認してください）")]
    Missing(&'static str),

    #[error("{key} の値が不正です: {value:?}（{reason}）")]
    Invalid {
        key:    &'static str,
        value:  String,
        reason: String,
    },
}

/// コンソールの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// REST API のベース URL
    pub api_url:   String,
    /// プッシュ通知の URL
    pub push_url:  Option<String>,
    /// Bearer トークン
    pub api_token: Option<String>,
    /// 現在のユーザー ID
    pub user_id:   Option<UserId>,
    /// 現在のロール
    pub role:      Role,
}

impl ConsoleConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// テスト間で環境変数が競合しないよう、取得方法を差し替えられるようにしている。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = optional("BISTRO_API_URL").ok_or(ConfigError::Missing("BISTRO_API_URL"))?;
        validate_url("BISTRO_API_URL", &api_url)?;

        let push_url = optional("BISTRO_PUSH_URL");
        if let Some(push_url) = &push_url {
            validate_url("BISTRO_PUSH_URL", push_url)?;
        }

        let user_id = optional("BISTRO_USER_ID")
            .map(|value| {
                value.parse::<UserId>().map_err(|e| ConfigError::Invalid {
                    key: "BISTRO_USER_ID",
                    value,
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let role = optional("BISTRO_USER_ROLE")
            .map(|value| {
                value.parse::<Role>().map_err(|e| ConfigError::Invalid {
                    key: "BISTRO_USER_ROLE",
                    value,
                    reason: e.to_string(),
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_url,
            push_url,
            api_token: optional("BISTRO_API_TOKEN"),
            user_id,
            role,
        })
    }

    /// セッションプロバイダ（ユーザー ID が未設定なら `None`）
    pub fn session(&self) -> Option<Session> {
        self.user_id.map(|user_id| Session::new(user_id, self.role))
    }
}

fn validate_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ConsoleConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_必須項目だけで読み込める() {
        let config = load(&[("BISTRO_API_URL", "http://localhost:8080/api")]).unwrap();

        assert_eq!(
            config,
            ConsoleConfig {
                api_url:   "http://localhost:8080/api".to_string(),
                push_url:  None,
                api_token: None,
                user_id:   None,
                role:      Role::Customer,
            }
        );
        assert_eq!(config.session(), None);
    }

    #[test]
    fn test_すべての項目を読み込める() {
        let config = load(&[
            ("BISTRO_API_URL", "http://localhost:8080/api"),
            ("BISTRO_PUSH_URL", "http://localhost:8080/events"),
            ("BISTRO_API_TOKEN", "token"),
            ("BISTRO_USER_ID", "42"),
            ("BISTRO_USER_ROLE", "Admin"),
        ])
        .unwrap();

        assert_eq!(config.push_url.as_deref(), Some("http://localhost:8080/events"));
        assert_eq!(config.api_token.as_deref(), Some("token"));
        assert_eq!(config.session(), Some(Session::new(UserId::new(42), Role::Admin)));
    }

    #[test]
    fn test_api_urlがなければエラー() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("BISTRO_API_URL")));
        assert_eq!(
            load(&[("BISTRO_API_URL", "  ")]),
            Err(ConfigError::Missing("BISTRO_API_URL"))
        );
    }

    #[test]
    fn test_不正なurlはエラー() {
        assert!(matches!(
            load(&[("BISTRO_API_URL", "not a url")]),
            Err(ConfigError::Invalid { key: "BISTRO_API_URL", .. })
        ));
        assert!(matches!(
            load(&[
                ("BISTRO_API_URL", "http://localhost:8080/api"),
                ("BISTRO_PUSH_URL", "::events"),
            ]),
            Err(ConfigError::Invalid { key: "BISTRO_PUSH_URL", .. })
        ));
    }

    #[test]
    fn test_不正なユーザーidとロールはエラー() {
        assert!(matches!(
            load(&[("BISTRO_API_URL", "http://a"), ("BISTRO_USER_ID", "abc")]),
            Err(ConfigError::Invalid { key: "BISTRO_USER_ID", .. })
        ));
        assert!(matches!(
            load(&[("BISTRO_API_URL", "http://a"), ("BISTRO_USER_ROLE", "chef")]),
            Err(ConfigError::Invalid { key: "BISTRO_USER_ROLE", .. })
        ));
    }
}
