use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 面包店 POS 服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_FILE | bakery.db | 数据库文件名 (位于 WORK_DIR 内) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | 是否输出 JSON 日志 |
/// | CURRENCY_SYMBOL | Rs. | 发票和报表中的货币符号 |
/// | SHOP_NAME | Bakery | 店铺名称 (发票抬头) |
/// | SEED_MENU | true | 菜单为空时写入默认菜单 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/bakery HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库文件名
    pub database_file: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// JSON 日志格式
    pub log_json: bool,
    /// 货币符号 (内置 PDF 字体不含 ₹)
    pub currency_symbol: String,
    /// 店铺名称
    pub shop_name: String,
    /// 首次启动时写入默认菜单
    pub seed_menu: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_file: std::env::var("DATABASE_FILE").unwrap_or_else(|_| "bakery.db".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "Rs.".into()),
            shop_name: std::env::var("SHOP_NAME").unwrap_or_else(|_| "Bakery".into()),
            seed_menu: std::env::var("SEED_MENU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件完整路径
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.database_file)
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
