/// Success envelope
///
/// Successful responses share the error envelope's shape, with the handler's
/// payload fields merged in at the top level:
///
/// ```json
/// {
///   "success": true,
///   "statusCode": 201,
///   "message": "Project created successfully.",
///   "project": { "id": "..." }
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{ErrorResponse, INTERNAL_ERROR_MESSAGE};

/// Payload for responses that only carry a message
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

/// A successful response with a status, an optional message and a payload
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub message: Option<String>,
    pub payload: T,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,

    #[serde(rename = "statusCode")]
    status_code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,

    #[serde(flatten)]
    payload: &'a T,
}

impl ApiResponse<Empty> {
    /// A message-only response
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            payload: Empty {},
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with `payload`
    pub fn ok(payload: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            payload,
        }
    }

    /// 201 Created with `payload`
    pub fn created(payload: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: None,
            payload,
        }
    }

    /// Sets the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            success: true,
            status_code: self.status.as_u16(),
            message: self.message.as_deref(),
            payload: &self.payload,
        };

        match serde_json::to_value(&envelope) {
            Ok(body) => (self.status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response payload: {}", e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(ErrorResponse {
                    success: false,
                    status_code: status.as_u16(),
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                    errors: None,
                });
                (status, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[derive(Serialize)]
    struct TokenPayload {
        token: String,
    }

    async fn render<T: Serialize>(response: ApiResponse<T>) -> (StatusCode, Value) {
        let response = response.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_message_only() {
        let (status, body) =
            render(ApiResponse::message(StatusCode::CREATED, "Signup successful.")).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "statusCode": 201,
                "message": "Signup successful."
            })
        );
    }

    #[tokio::test]
    async fn test_payload_is_flattened() {
        let response = ApiResponse::created(TokenPayload {
            token: "abc".to_string(),
        })
        .with_message("Login successfully.");
        let (_, body) = render(response).await;

        assert_eq!(body["token"], "abc");
        assert_eq!(body["message"], "Login successfully.");
        assert_eq!(body["statusCode"], 201);
    }

    #[tokio::test]
    async fn test_ok_without_message() {
        let (status, body) = render(ApiResponse::ok(TokenPayload {
            token: "t".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("message").is_none());
        assert_eq!(body["success"], true);
    }
}
