//! 核心错误处理模块
//!
//! 对外只暴露两类错误：校验失败 (422) 与资源不存在 (404)。
//! 存储层故障不进入错误信封，直接以 500 响应并记录日志。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};
use validator::ValidationErrors;

use crate::app::product::store::StoreError;

/// 接口错误类型
#[derive(Debug)]
pub enum ApiError {
    ValidationFailed(ValidationErrors),
    NotFound,
    Storage(StoreError),
}

/// 错误信封中的单个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorField {
    pub code: &'static str,
    pub title: &'static str,
}

impl ErrorField {
    pub const UNPROCESSABLE_ENTITY: Self = Self {
        code: "ERROR-1",
        title: "Unprocessable Entity",
    };

    pub const NOT_FOUND: Self = Self {
        code: "ERROR-2",
        title: "Not Found",
    };
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorField>,
}

impl ErrorResponse {
    pub fn single(field: ErrorField) -> Self {
        Self {
            errors: vec![field],
        }
    }
}

impl ApiError {
    /// 空的校验失败（请求体结构不符合预期时使用）
    pub fn unprocessable() -> Self {
        ApiError::ValidationFailed(ValidationErrors::new())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对外的错误信封；存储错误没有信封
    pub fn envelope(&self) -> Option<ErrorResponse> {
        match self {
            ApiError::ValidationFailed(_) => {
                Some(ErrorResponse::single(ErrorField::UNPROCESSABLE_ENTITY))
            }
            ApiError::NotFound => Some(ErrorResponse::single(ErrorField::NOT_FOUND)),
            ApiError::Storage(_) => None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::ValidationFailed(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}

/// 校验失败的字段名，排序后便于日志比对
pub fn failed_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::ValidationFailed(errors) => {
                debug!(fields = ?failed_fields(errors), "validation failed");
            }
            ApiError::NotFound => {}
            ApiError::Storage(err) => {
                error!(error = %err, "product store failure");
            }
        }

        match self.envelope() {
            Some(envelope) => (status, Json(envelope)).into_response(),
            None => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_failure_maps_to_error_1() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));
        errors.add("price", ValidationError::new("numeric"));

        let err = ApiError::from(errors);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // 多个字段失败也只返回一条错误
        let body = serde_json::to_value(err.envelope().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "errors": [{ "code": "ERROR-1", "title": "Unprocessable Entity" }]
            })
        );
    }

    #[test]
    fn test_not_found_maps_to_error_2() {
        let err = ApiError::NotFound;
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let body = serde_json::to_value(err.envelope().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "errors": [{ "code": "ERROR-2", "title": "Not Found" }] })
        );
    }

    #[test]
    fn test_storage_error_has_no_envelope() {
        let err = ApiError::from(StoreError::Internal("down".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.envelope().is_none());
    }

    #[test]
    fn test_failed_fields_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add("price", ValidationError::new("numeric"));
        errors.add("name", ValidationError::new("required"));
        assert_eq!(failed_fields(&errors), vec!["name", "price"]);
    }
}
