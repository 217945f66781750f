//! 与具体资源无关的基础设施：错误、响应文档、提取器、校验、中间件

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod validation;
