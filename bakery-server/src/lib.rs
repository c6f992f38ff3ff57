//! Bakery Server - 面包店收银 (POS) 后端
//!
//! # 架构概述
//!
//! 单店部署的 HTTP 服务，提供以下核心功能：
//!
//! - **菜单** (`catalog`): 菜单增删改查，进程内缓存
//! - **订单** (`orders`): 服务端定价、原子落库
//! - **销售统计** (`sales`): 按月 (UTC 半开区间) 汇总
//! - **打印** (`printing`): 分页 PDF 发票和月度报表
//! - **支付** (`payment`): 支付二维码
//! - **认证** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! bakery-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、密码哈希、提取器
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── db/            # SQLite 连接池、仓储、初始数据
//! ├── catalog/       # 菜单服务
//! ├── orders/        # 订单服务
//! ├── sales/         # 销售统计
//! ├── printing/      # 发票 / 报表渲染
//! ├── payment/       # 二维码
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod middleware;
pub mod orders;
pub mod payment;
pub mod printing;
pub mod sales;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, OptionalUser};
pub use catalog::MenuCatalog;
pub use core::{Config, Server, ServerError, ServerState};
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env`，按配置初始化日志
///
/// 日志级别与格式取自 `LOG_LEVEL` / `LOG_JSON`；生产环境额外写入
/// `WORK_DIR/logs` 下的滚动日志文件。
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    let log_dir = if config.is_production() {
        log_dir.to_str()
    } else {
        None
    };

    init_logger_with_file(&config.log_level, config.log_json, log_dir)?;
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____        __
   / __ )____ _/ /_____  _______  __
  / __  / __ `/ //_/ _ \/ ___/ / / /
 / /_/ / /_/ / ,< /  __/ /  / /_/ /
/_____/\__,_/_/|_|\___/_/   \__, /
                           /____/
    "#
    );
}
