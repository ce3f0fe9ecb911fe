//! Settings management service
//!
//! Provides unified business logic for the system settings subsystem:
//! category-filtered reads, single and bulk value updates, and test
//! delivery pass-throughs to the notification collaborator.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{GradekeeperError, Result};
use crate::notify::{EmailConfig, Notifier, SmsConfig};
use crate::settings::coercion;
use crate::settings::seed::categories;
use crate::settings::types::{SettingType, SettingValue};
use crate::settings::store::SettingStore;

use migration::entities::setting;

// ============ Service DTOs ============

/// 单个设置项视图（值已解码）
#[derive(Debug, Clone, Serialize)]
pub struct SettingView {
    pub key: String,
    pub value: SettingValue,
    pub value_type: SettingType,
    pub category: Option<String>,
    pub description: Option<String>,
    pub updated_at: String,
}

/// 批量更新里单个键的失败记录
#[derive(Debug, Clone, Serialize)]
pub struct SettingFailure {
    pub key: String,
    pub reason: String,
}

/// 批量更新结果：成功应用的设置 + 逐键失败列表
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateOutcome {
    pub updated: Vec<SettingView>,
    pub failed: Vec<SettingFailure>,
}

/// 测试投递结果（如实转述协作方的回执）
#[derive(Debug, Clone, Serialize)]
pub struct TestSendOutcome {
    pub success: bool,
    pub message: String,
}

// ============ SettingsService Implementation ============

/// Service for the system settings store
///
/// All reads go through the coercion layer; internal code never hands raw
/// text to callers except as the documented per-key decode fallback.
pub struct SettingsService {
    store: SettingStore,
    notifier: Arc<dyn Notifier>,
}

impl SettingsService {
    pub fn new(store: SettingStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &SettingStore {
        &self.store
    }

    /// 将存储行转换为视图
    ///
    /// 解码失败不让整行消失：值回退为原始文本，并记录告警。
    /// 这是 fetch 的逐键部分成功策略（见 DESIGN.md）。
    fn to_view(model: setting::Model) -> SettingView {
        let ty = match model.value_type.parse::<SettingType>() {
            Ok(ty) => ty,
            Err(e) => {
                warn!("Setting '{}' has an invalid type tag: {}", model.key, e);
                SettingType::String
            }
        };

        let value = match &model.value {
            None => Value::Null,
            Some(raw_text) => match coercion::decode(raw_text, ty) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Setting '{}' failed to decode, returning raw text: {}", model.key, e);
                    Value::String(raw_text.clone())
                }
            },
        };

        SettingView {
            key: model.key,
            value,
            value_type: ty,
            category: model.category,
            description: model.description,
            updated_at: model.updated_at.to_rfc3339(),
        }
    }

    /// 读取设置并组装为扁平的 key → 解码值映射，可按分类过滤
    pub async fn fetch(&self, category: Option<&str>) -> Result<BTreeMap<String, SettingValue>> {
        let models = self.store.get_all(category).await?;
        Ok(models
            .into_iter()
            .map(Self::to_view)
            .map(|view| (view.key, view.value))
            .collect())
    }

    /// 读取设置的完整视图序列（管理端表格用）
    pub async fn fetch_views(&self, category: Option<&str>) -> Result<Vec<SettingView>> {
        let models = self.store.get_all(category).await?;
        Ok(models.into_iter().map(Self::to_view).collect())
    }

    /// 更新单个设置
    ///
    /// 键未注册返回 NotFound；值与声明类型不符返回 Coercion 错误。
    pub async fn update_one(&self, key: &str, value: &SettingValue) -> Result<SettingView> {
        let model = self
            .store
            .get_by_key(key)
            .await?
            .ok_or_else(|| GradekeeperError::not_found(format!("Setting '{}' not found", key)))?;

        let ty = model
            .value_type
            .parse::<SettingType>()
            .map_err(GradekeeperError::validation)?;
        let raw = coercion::normalize(value, ty)?;

        let updated = self.store.upsert_value(key, &raw).await?;
        info!("Setting updated: {} = {}", key, raw);

        Ok(Self::to_view(updated))
    }

    /// 批量更新调解器
    ///
    /// 阶段一（纯校验）：未注册的键跳过并记为失败，已注册的键按声明
    /// 类型校验新值，失败的键被剔除。任何单键失败都不阻塞其余键。
    /// 阶段二：通过校验的键值对在一个事务里落库，全部生效或全不生效。
    pub async fn update_bulk(
        &self,
        changes: &BTreeMap<String, SettingValue>,
    ) -> Result<BulkUpdateOutcome> {
        let mut accepted: Vec<(String, String)> = Vec::new();
        let mut failed: Vec<SettingFailure> = Vec::new();

        for (key, value) in changes {
            let model = match self.store.get_by_key(key).await? {
                Some(model) => model,
                None => {
                    // 前端表单可能提交未知键的超集，跳过而非报错
                    failed.push(SettingFailure {
                        key: key.clone(),
                        reason: "unknown setting key, skipped".to_string(),
                    });
                    continue;
                }
            };

            let ty = match model.value_type.parse::<SettingType>() {
                Ok(ty) => ty,
                Err(e) => {
                    failed.push(SettingFailure {
                        key: key.clone(),
                        reason: e,
                    });
                    continue;
                }
            };

            match coercion::normalize(value, ty) {
                Ok(raw) => accepted.push((key.clone(), raw)),
                Err(e) => failed.push(SettingFailure {
                    key: key.clone(),
                    reason: e.message().to_string(),
                }),
            }
        }

        let updated = self
            .store
            .apply_values(&accepted)
            .await?
            .into_iter()
            .map(Self::to_view)
            .collect::<Vec<_>>();

        if !failed.is_empty() {
            warn!(
                "Bulk update applied {} settings, {} keys rejected",
                updated.len(),
                failed.len()
            );
        }

        Ok(BulkUpdateOutcome { updated, failed })
    }

    /// 把某个分类的已解码设置反序列化为配置结构体
    async fn channel_config<T: serde::de::DeserializeOwned>(&self, category: &str) -> Result<T> {
        let map = self.fetch(Some(category)).await?;
        let object: serde_json::Map<String, Value> = map.into_iter().collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| {
            GradekeeperError::validation(format!("{} settings are incomplete: {}", category, e))
        })
    }

    /// 用当前 email 设置发送一封测试邮件
    pub async fn send_test_email(
        &self,
        to: &str,
        subject: Option<&str>,
        message: Option<&str>,
    ) -> Result<TestSendOutcome> {
        let config: EmailConfig = self.channel_config(categories::EMAIL).await?;

        if !config.email_enabled {
            return Ok(TestSendOutcome {
                success: false,
                message: "Email sending is disabled".to_string(),
            });
        }

        let subject = subject.unwrap_or("Gradekeeper test email");
        let body = message.unwrap_or("This is a test email from Gradekeeper.");

        match self.notifier.send_email(&config, to, subject, body).await {
            Ok(receipt) => Ok(TestSendOutcome {
                success: true,
                message: receipt,
            }),
            Err(e) => Ok(TestSendOutcome {
                success: false,
                message: e.message().to_string(),
            }),
        }
    }

    /// 用当前 sms 设置发送一条测试短信
    pub async fn send_test_sms(&self, to: &str, message: Option<&str>) -> Result<TestSendOutcome> {
        let config: SmsConfig = self.channel_config(categories::SMS).await?;

        if !config.sms_enabled {
            return Ok(TestSendOutcome {
                success: false,
                message: "SMS sending is disabled".to_string(),
            });
        }

        let body = message.unwrap_or("This is a test SMS from Gradekeeper.");

        match self.notifier.send_sms(&config, to, body).await {
            Ok(receipt) => Ok(TestSendOutcome {
                success: true,
                message: receipt,
            }),
            Err(e) => Ok(TestSendOutcome {
                success: false,
                message: e.message().to_string(),
            }),
        }
    }
}
