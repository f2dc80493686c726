//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`location_profiles`] - 位置档案管理接口（管理端写路径 + 列表）
//! - [`products`] - 商品目录读取接口（按城市调价）
//! - [`services`] - 服务目录读取接口（按城市调价）

pub mod convert;

pub mod health;

// Admin write path
pub mod location_profiles;

// Catalog read paths
pub mod products;
pub mod services;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
