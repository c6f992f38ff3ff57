use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::catalog::MenuCatalog;
use crate::core::{Config, Result, ServerError};
use crate::db::{DbService, seed};
use crate::orders::OrderService;
use crate::printing::{InvoiceRenderer, SalesReportRenderer};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，每个请求 clone 一份成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | catalog | MenuCatalog | 菜单服务 (带缓存) |
/// | orders | OrderService | 订单服务 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// # 使用示例
///
/// ```ignore
/// let menu = state.catalog.snapshot().await?;
/// let order = state.orders.get(42).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库
    pub db: DbService,
    /// 菜单服务 (进程内缓存，修改时失效)
    pub catalog: MenuCatalog,
    /// 订单服务
    pub orders: OrderService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, db: DbService) -> Self {
        let catalog = MenuCatalog::new(db.pool.clone());
        let orders = OrderService::new(db.pool.clone(), catalog.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            catalog,
            orders,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 数据库 (work_dir/bakery.db) 与迁移
    /// 3. 默认数据 (菜单、admin 账号)
    /// 4. 各服务 (Catalog, Orders, JWT)
    pub async fn initialize(config: &Config) -> Result<Self> {
        if config.is_production() && config.jwt.ephemeral {
            return Err(ServerError::Config(
                "JWT_SECRET must be set in production".to_string(),
            ));
        }

        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        let db_path = db_path
            .to_str()
            .ok_or_else(|| ServerError::Config(format!("Invalid database path: {:?}", db_path)))?;
        let db = DbService::new(db_path).await?;

        Self::seed(config, &db.pool).await?;

        tracing::info!(work_dir = %config.work_dir, "Server state initialized");
        Ok(Self::new(config.clone(), db))
    }

    /// 使用内存数据库初始化 (测试和临时实例)
    pub async fn in_memory(config: &Config) -> Result<Self> {
        let db = DbService::open_in_memory().await?;
        Self::seed(config, &db.pool).await?;
        Ok(Self::new(config.clone(), db))
    }

    async fn seed(config: &Config, pool: &SqlitePool) -> Result<()> {
        if config.seed_menu {
            seed::seed_menu(pool).await?;
        }
        seed::seed_admin(pool).await?;
        Ok(())
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 发票渲染器 (使用配置的店名和货币符号)
    pub fn invoice_renderer(&self) -> InvoiceRenderer {
        InvoiceRenderer::new(&self.config.shop_name, &self.config.currency_symbol)
    }

    /// 销售报表渲染器
    pub fn sales_report_renderer(&self) -> SalesReportRenderer {
        SalesReportRenderer::new(&self.config.currency_symbol)
    }
}
