//! Product Catalog API 模块
//!
//! 目录读取路径：返回的价格字段已按城市调整，
//! 原始位置档案记录不会出现在响应里。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
