//! 应用层：共享状态与路由装配

pub mod product;
pub mod welcome;

use axum::{middleware, routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use self::product::{
    resource::{Flat, JsonApi},
    service::ProductService,
    store::ProductStore,
};
use crate::config::{Config, ResourceFormat};
use crate::core::middleware::request_logging_middleware;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    /// 生成资源链接用的对外地址
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(product_service: ProductService, base_url: &str) -> Self {
        Self {
            product_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}

/// 构建完整路由，响应格式在这里一次性确定
pub fn router(config: &Config, store: Arc<dyn ProductStore>) -> Router {
    let state = AppState::new(ProductService::new(store), &config.api.base_url);

    let products = match config.api.format {
        ResourceFormat::Enveloped => product::routes::<JsonApi>(),
        ResourceFormat::Flat => product::routes::<Flat>(),
    };

    let mut app = Router::new()
        .route("/", get(welcome::api_info))
        .route("/greeting", get(welcome::greeting))
        .route("/health", get(welcome::health_check))
        .merge(products)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.http.timeout_seconds,
                ))),
        );

    if config.http.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}
