//! 通知协作方边界
//!
//! 邮件/短信的实际投递属于外部协作方，设置服务只负责把当前解码后的
//! 供应商配置交给它并如实转述结果。这里定义协作方 trait 与一个
//! 仅记录日志的默认实现。

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::errors::Result;

/// 邮件通道配置（来自 email 分类的已解码设置）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub email_enabled: bool,
    pub email_provider: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from_email: String,
    pub smtp_from_name: String,
    pub email_encryption: String,
}

/// 短信通道配置（来自 sms 分类的已解码设置）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsConfig {
    pub sms_enabled: bool,
    pub sms_provider: String,
    pub sms_api_key: String,
    pub sms_api_secret: String,
    pub sms_sender_id: String,
}

/// 外部通知协作方
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送一封邮件，成功时返回协作方的回执消息
    async fn send_email(
        &self,
        config: &EmailConfig,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String>;

    /// 发送一条短信，成功时返回协作方的回执消息
    async fn send_sms(&self, config: &SmsConfig, to: &str, body: &str) -> Result<String>;
}

/// 默认实现：不做真实投递，记录日志后报告成功
///
/// 真实的 SMTP/短信网关在部署环境里以独立协作方接入。
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_email(
        &self,
        config: &EmailConfig,
        to: &str,
        subject: &str,
        _body: &str,
    ) -> Result<String> {
        info!(
            "Test email to {} via {} ({}:{}), subject: {}",
            to, config.email_provider, config.smtp_host, config.smtp_port, subject
        );
        Ok(format!("Test email queued for {}", to))
    }

    async fn send_sms(&self, config: &SmsConfig, to: &str, _body: &str) -> Result<String> {
        info!("Test SMS to {} via {}", to, config.sms_provider);
        Ok(format!("Test SMS queued for {}", to))
    }
}
