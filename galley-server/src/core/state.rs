use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::record::OperationEntry;
use crate::db::repository::user;
use crate::oplog::{OpLogService, OpLogWorker};
use crate::services::sms::{ConsoleSender, GatewaySender, SmsSender};
use crate::services::{FileStorage, SmsService};

/// 应用状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。每个请求克隆一份。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | jwt | JWT 认证服务 |
/// | sms | 短信验证码服务 |
/// | storage | 上传文件存储 |
/// | oplog | 操作日志服务 |
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt: Arc<JwtService>,
    pub sms: Arc<SmsService>,
    pub storage: Arc<FileStorage>,
    pub oplog: OpLogService,
    oplog_rx: Arc<std::sync::Mutex<Option<mpsc::Receiver<OperationEntry>>>>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// 按顺序初始化：工作目录、数据库（迁移 + 超管种子）、各服务。
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path()).await?;
        Self::with_db(config, db).await
    }

    /// 使用内存数据库初始化（测试）
    pub async fn initialize_in_memory(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new_in_memory().await?;
        Self::with_db(config, db).await
    }

    async fn with_db(config: &Config, db: DbService) -> anyhow::Result<Self> {
        user::ensure_superuser(
            &db.pool,
            &config.superuser_telephone,
            &config.superuser_password,
        )
        .await
        .map_err(shared::error::AppError::from)?;

        let sender: Arc<dyn SmsSender> = match &config.sms_gateway_url {
            Some(url) => Arc::new(GatewaySender::new(
                url.clone(),
                config.sms_gateway_key.clone(),
            )),
            None => Arc::new(ConsoleSender),
        };

        let (oplog, oplog_rx) = OpLogService::new(config.enable_operation_log);

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            sms: Arc::new(SmsService::new(sender)),
            storage: Arc::new(FileStorage::new(&config.work_dir)),
            oplog,
            oplog_rx: Arc::new(std::sync::Mutex::new(Some(oplog_rx))),
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用；重复调用是空操作。
    pub fn start_background_tasks(&self) {
        let rx = self.oplog_rx.lock().expect("oplog receiver lock").take();
        if let Some(rx) = rx {
            let worker = OpLogWorker::new(self.pool.clone());
            tokio::spawn(worker.run(rx));
        }
    }
}
