use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 持有配置和数据库的共享引用
///
/// ServerState 在所有请求处理器之间浅拷贝共享。目录读取路径
/// （商品/服务）是纯读操作，不持有任何跨请求的可变状态；
/// 唯一的写路径（位置档案）通过存储层的唯一索引串行化，
/// 因此这里不需要任何应用级锁。
///
/// # 字段
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试中可以用
    /// 临时目录里的数据库直接构造。
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/market.db)
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("market.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.db)
    }
}
