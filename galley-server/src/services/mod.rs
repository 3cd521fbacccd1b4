//! 服务模块
//!
//! - [`sms`] - 短信验证码服务
//! - [`storage`] - 上传文件存储服务

pub mod sms;
pub mod storage;

pub use sms::{SmsSender, SmsService};
pub use storage::FileStorage;
