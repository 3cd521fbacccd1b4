use crate::auth::JwtConfig;

/// 服务器配置
///
/// 启动时从环境变量加载一次，之后不可变；通过构造参数注入各组件，
/// 不存在 import 时读取的全局配置。
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/galley | 工作目录（数据库、上传、日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SUPERUSER_TELEPHONE | 15000000000 | 初始超管手机号 |
/// | SUPERUSER_PASSWORD | galley@123 | 初始超管密码 |
/// | DEFAULT_PASSWORD | 123456 | 新建用户默认密码 |
/// | SMS_GATEWAY_URL | (未设置) | 短信网关地址，缺省走控制台发送 |
/// | SMS_GATEWAY_KEY | (未设置) | 短信网关凭证 |
/// | ENABLE_OPERATION_LOG | true | 是否记录操作日志 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 初始超管手机号
    pub superuser_telephone: String,
    /// 初始超管密码
    pub superuser_password: String,
    /// 新建用户默认密码
    pub default_password: String,
    /// 短信网关地址 (缺省走控制台发送)
    pub sms_gateway_url: Option<String>,
    /// 短信网关凭证
    pub sms_gateway_key: Option<String>,
    /// 是否记录操作日志
    pub enable_operation_log: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/galley".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            superuser_telephone: std::env::var("SUPERUSER_TELEPHONE")
                .unwrap_or_else(|_| "15000000000".into()),
            superuser_password: std::env::var("SUPERUSER_PASSWORD")
                .unwrap_or_else(|_| "galley@123".into()),
            default_password: std::env::var("DEFAULT_PASSWORD").unwrap_or_else(|_| "123456".into()),
            sms_gateway_url: std::env::var("SMS_GATEWAY_URL").ok(),
            sms_gateway_key: std::env::var("SMS_GATEWAY_KEY").ok(),
            enable_operation_log: std::env::var("ENABLE_OPERATION_LOG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
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

    /// 数据库文件路径
    pub fn database_path(&self) -> String {
        format!("{}/galley.db", self.work_dir)
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
