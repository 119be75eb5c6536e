//! レスポンスの共通ハンドリング

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// レスポンスの共通ハンドリング
///
/// 成功時はレスポンスボディを `T` にデシリアライズし、
/// エラー時はステータスコードに応じた `ClientError` を返す。
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        return Ok(body);
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_status(status, body))
}

/// 失敗ステータスを `ClientError` に分類する
pub(crate) fn error_from_status(status: StatusCode, body: String) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(body),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
        StatusCode::FORBIDDEN => ClientError::Forbidden(body),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        status if status.is_server_error() => ClientError::Server {
            status: status.as_u16(),
            body,
        },
        status => ClientError::Unexpected(format!("予期しないステータス {}: {}", status, body)),
    }
}
