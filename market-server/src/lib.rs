//! Market Server - 租赁市场目录服务
//!
//! # 架构概述
//!
//! 核心是位置维度的覆盖与调价引擎：给定目录实体（商品、服务、
//! 商品分类、服务分类）和目标城市，通过解析管理端维护的
//! "位置档案"记录，在读取时计算该 (实体, 城市) 组合的
//! 有效价格和有效文案/SEO 内容。
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，档案唯一性由
//!   `(city, scope, target)` 唯一索引在写入时原子保证
//! - **调价引擎** (`pricing`): 档案解析 + 价格调整 + 有效内容
//! - **HTTP API** (`api`): 管理端档案写路径 + 目录读取路径
//!
//! # 模块结构
//!
//! ```text
//! market-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── pricing/       # 解析器 + 调价器 + 有效内容
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use pricing::{EffectiveContent, ProfileResolver, ResolvedProfiles};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  ___           __        __
   /  |/  /___ ______/ /_____  / /_
  / /|_/ / __ `/ ___/ //_/ _ \/ __/
 / /  / / /_/ / /  / ,< /  __/ /_
/_/  /_/\__,_/_/  /_/|_|\___/\__/
    "#
    );
}
