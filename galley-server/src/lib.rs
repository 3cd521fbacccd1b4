//! Galley Server - 餐饮运营后台管理系统
//!
//! # 架构概述
//!
//! 分层的 CRUD 管理服务：HTTP 路由 → 数据访问层 → SQLite。
//!
//! - **数据库** (`db`): 通用数据访问层（分页/模糊查询/软删除/批量导入导出）
//!   与树形构建器
//! - **认证** (`auth`): JWT + Argon2，角色→菜单权限每请求解析
//! - **HTTP API** (`api`): 统一响应信封的 RESTful 接口
//! - **操作日志** (`oplog`): mpsc 通道 + 后台 worker
//! - **服务** (`services`): 短信验证码、上传文件存储
//!
//! # 模块结构
//!
//! ```text
//! galley-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限解析
//! ├── db/            # 连接池、通用 DAO、树构建、仓储
//! ├── api/           # HTTP 路由和处理器
//! ├── oplog/         # 操作日志
//! ├── services/      # 短信、文件存储
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod oplog;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, PermissionSet};
pub use core::{AppState, Config, Server};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

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

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ / /__  __  __
 / / __/ __ `/ / / _ \/ / / /
/ /_/ / /_/ / / /  __/ /_/ /
\____/\__,_/_/_/\___/\__, /
                    /____/
    "#
    );
}
