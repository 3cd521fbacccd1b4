//! 认证授权模块
//!
//! 提供 JWT 认证、权限解析和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`resolver`] - 角色→菜单权限解析（每请求重新计算）
//! - [`require_auth`] - 认证中间件
//! - [`require_permission`] - 权限检查中间件

pub mod jwt;
pub mod middleware;
pub mod resolver;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
pub use resolver::PermissionSet;
