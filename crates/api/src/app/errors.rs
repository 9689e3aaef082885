use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use dzcart_account::AccountError;
use dzcart_core::DomainError;

pub fn account_error_to_response(err: AccountError) -> axum::response::Response {
    match err {
        AccountError::Network(msg) => json_error(StatusCode::BAD_GATEWAY, "upstream_error", msg),
        AccountError::Api(404, msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        AccountError::Api(_, msg) => json_error(StatusCode::BAD_GATEWAY, "upstream_error", msg),
        AccountError::Parse(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "parse_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
