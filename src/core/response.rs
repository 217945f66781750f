//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 顶层文档，`{"data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 请求体中的 `{"data": {...}}`，`data` 必须提供
#[derive(Debug, Deserialize)]
pub struct RequestDocument<T> {
    pub data: T,
}
