//! 产品资源：模型、校验规则、存储、表示、服务与处理器

pub mod handler;
pub mod model;
pub mod resource;
pub mod rules;
pub mod service;
pub mod store;

use axum::{routing::get, Router};

use self::resource::ResponseShape;
use crate::app::AppState;

/// 产品路由表
pub fn routes<S: ResponseShape>() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handler::index::<S>).post(handler::store::<S>),
        )
        .route(
            "/products/:id",
            get(handler::show::<S>)
                .put(handler::update::<S>)
                .delete(handler::destroy::<S>),
        )
}
