//! # Product API
//!
//! 单一 "Product" 资源的 CRUD HTTP 接口：
//! - 列表、新建、详情、更新、删除五个端点
//! - 规则表校验与统一的错误信封 (`ERROR-1` / `ERROR-2`)
//! - 扁平与 JSON:API 两种资源表示，部署时二选一
//! - PostgreSQL 存储（`database` 特性）与内存存储

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::Config;
