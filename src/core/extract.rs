//! 请求体提取器
//!
//! JSON 语法错误、缺少 `Content-Type` 等仍交给 axum 的默认拒绝处理；
//! 语法正确但结构不符（字段类型不对等）的请求体不会立刻拒绝，而是
//! 作为一次校验失败交给处理器，由处理器决定何时上报。更新接口要先
//! 判断资源是否存在，因此这一步必须延后。

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;

/// 延迟上报结构错误的 JSON 请求体
#[derive(Debug)]
pub struct JsonPayload<T>(pub Result<T, ApiError>);

impl<T> JsonPayload<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        self.0
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(Ok(value))),
            Err(JsonRejection::JsonDataError(err)) => {
                debug!(error = %err, "request body does not match the expected shape");
                Ok(Self(Err(ApiError::unprocessable())))
            }
            Err(rejection) => Err(rejection.into_response()),
        }
    }
}
