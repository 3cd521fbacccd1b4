//! SMS verification service
//!
//! Verification codes live in-process in a [`DashMap`] with expiry and an
//! attempt counter. Delivery goes through the [`SmsSender`] trait: the
//! console sender for development, the HTTP gateway sender when
//! `SMS_GATEWAY_URL` is configured.

use async_trait::async_trait;
use dashmap::DashMap;
use rand::Rng;
use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;

/// Verification code lifetime (milliseconds)
const CODE_TTL_MS: i64 = 5 * 60 * 1000;
/// Wrong guesses tolerated before the code is burned
const MAX_ATTEMPTS: u32 = 5;

/// Message delivery backend
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, telephone: &str, content: &str) -> AppResult<()>;
}

/// Development sender: the message goes to the log only
pub struct ConsoleSender;

#[async_trait]
impl SmsSender for ConsoleSender {
    async fn send(&self, telephone: &str, content: &str) -> AppResult<()> {
        tracing::info!(telephone, content, "SMS (console sender)");
        Ok(())
    }
}

/// HTTP gateway sender
pub struct GatewaySender {
    client: reqwest::Client,
    endpoint: String,
    app_key: Option<String>,
}

impl GatewaySender {
    pub fn new(endpoint: String, app_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            app_key,
        }
    }
}

#[async_trait]
impl SmsSender for GatewaySender {
    async fn send(&self, telephone: &str, content: &str) -> AppResult<()> {
        let mut body = serde_json::json!({
            "telephone": telephone,
            "content": content,
        });
        if let Some(key) = &self.app_key {
            body["app_key"] = serde_json::json!(key);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(ErrorCode::SmsGatewayError, format!("gateway: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::SmsGatewayError,
                format!("gateway answered {}", response.status()),
            ));
        }
        Ok(())
    }
}

struct CodeEntry {
    code: String,
    expires_at: i64,
    attempts: u32,
}

/// 短信验证码服务
pub struct SmsService {
    codes: DashMap<String, CodeEntry>,
    sender: Arc<dyn SmsSender>,
}

impl SmsService {
    pub fn new(sender: Arc<dyn SmsSender>) -> Self {
        Self {
            codes: DashMap::new(),
            sender,
        }
    }

    /// Generate, store and deliver a 6-digit verification code
    ///
    /// Returns the message text so the caller can write the send record.
    pub async fn send_code(&self, telephone: &str) -> AppResult<String> {
        let code = generate_code();
        let content = format!("【Galley】您的验证码是 {code}，5分钟内有效。");

        self.sender.send(telephone, &content).await?;

        self.codes.insert(
            telephone.to_string(),
            CodeEntry {
                code,
                expires_at: now_millis() + CODE_TTL_MS,
                attempts: 0,
            },
        );
        Ok(content)
    }

    /// Verify a code; a successful match consumes it
    pub fn verify_code(&self, telephone: &str, code: &str) -> AppResult<()> {
        let mut entry = self
            .codes
            .get_mut(telephone)
            .ok_or_else(|| AppError::new(ErrorCode::SmsCodeInvalid))?;

        if entry.expires_at < now_millis() {
            drop(entry);
            self.codes.remove(telephone);
            return Err(AppError::new(ErrorCode::SmsCodeExpired));
        }

        if entry.attempts >= MAX_ATTEMPTS {
            drop(entry);
            self.codes.remove(telephone);
            return Err(AppError::new(ErrorCode::TooManyAttempts));
        }

        if entry.code != code {
            entry.attempts += 1;
            return Err(AppError::new(ErrorCode::SmsCodeInvalid));
        }

        drop(entry);
        self.codes.remove(telephone);
        Ok(())
    }

    /// Deliver a free-form notification (e.g. an initialized password)
    pub async fn send_text(&self, telephone: &str, content: &str) -> AppResult<()> {
        self.sender.send(telephone, content).await
    }
}

fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SmsService {
        SmsService::new(Arc::new(ConsoleSender))
    }

    #[tokio::test]
    async fn test_code_roundtrip() {
        let svc = service();
        svc.send_code("13800000000").await.unwrap();
        let code = svc.codes.get("13800000000").unwrap().code.clone();

        assert!(svc.verify_code("13800000000", &code).is_ok());
        // consumed on success
        assert!(svc.verify_code("13800000000", &code).is_err());
    }

    #[tokio::test]
    async fn test_wrong_code_counts_attempts() {
        let svc = service();
        svc.send_code("13800000000").await.unwrap();

        for _ in 0..MAX_ATTEMPTS {
            let err = svc.verify_code("13800000000", "000000x").unwrap_err();
            assert_eq!(err.code, ErrorCode::SmsCodeInvalid);
        }
        let err = svc.verify_code("13800000000", "000000x").unwrap_err();
        assert_eq!(err.code, ErrorCode::TooManyAttempts);
    }

    #[tokio::test]
    async fn test_expired_code_rejected() {
        let svc = service();
        svc.send_code("13800000000").await.unwrap();
        svc.codes.get_mut("13800000000").unwrap().expires_at = 0;

        let err = svc.verify_code("13800000000", "123456").unwrap_err();
        assert_eq!(err.code, ErrorCode::SmsCodeExpired);
    }

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..32 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
