//! 设置管理 API 端点

use std::collections::BTreeMap;

use actix_web::{Responder, Result as ActixResult, web};
use serde::Deserialize;
use tracing::warn;

use crate::settings::{SettingValue, SettingsService};

use super::helpers::{api_result, error_from_gradekeeper, success_response};

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    pub category: Option<String>,
}

/// 单个值载荷：`{ "value": ... }`
#[derive(Debug, Deserialize)]
pub struct ValueBody {
    pub value: SettingValue,
}

/// 批量更新请求：`{ "settings": { key: { "value": ... } } }`
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub settings: BTreeMap<String, ValueBody>,
}

/// 测试邮件请求
#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub to: String,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// 测试短信请求
#[derive(Debug, Deserialize)]
pub struct TestSmsRequest {
    pub to: String,
    pub message: Option<String>,
}

/// 获取设置（key → 解码值映射，可按 category 过滤）
pub async fn get_settings(
    service: web::Data<SettingsService>,
    query: web::Query<SettingsQuery>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.fetch(query.category.as_deref()).await,
    ))
}

/// 获取设置的完整视图序列（管理端表格需要 type/description 渲染表单）
pub async fn get_setting_views(
    service: web::Data<SettingsService>,
    query: web::Query<SettingsQuery>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.fetch_views(query.category.as_deref()).await,
    ))
}

/// 更新单个设置
pub async fn update_setting(
    service: web::Data<SettingsService>,
    path: web::Path<String>,
    body: web::Json<ValueBody>,
) -> ActixResult<impl Responder> {
    let key = path.into_inner();

    match service.update_one(&key, &body.value).await {
        Ok(view) => Ok(success_response(view)),
        Err(e) => {
            warn!("Failed to update setting {}: {}", key, e);
            Ok(error_from_gradekeeper(&e))
        }
    }
}

/// 批量更新设置
///
/// 未知键与类型不符的键以逐键失败形式返回，其余键照常生效；
/// 只有存储层事务失败才整体报错。
pub async fn bulk_update_settings(
    service: web::Data<SettingsService>,
    body: web::Json<BulkUpdateRequest>,
) -> ActixResult<impl Responder> {
    let changes: BTreeMap<String, SettingValue> = body
        .into_inner()
        .settings
        .into_iter()
        .map(|(key, body)| (key, body.value))
        .collect();

    Ok(api_result(service.update_bulk(&changes).await))
}

/// 用当前邮件设置发送测试邮件
pub async fn send_test_email(
    service: web::Data<SettingsService>,
    body: web::Json<TestEmailRequest>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service
            .send_test_email(&body.to, body.subject.as_deref(), body.message.as_deref())
            .await,
    ))
}

/// 用当前短信设置发送测试短信
pub async fn send_test_sms(
    service: web::Data<SettingsService>,
    body: web::Json<TestSmsRequest>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.send_test_sms(&body.to, body.message.as_deref()).await,
    ))
}
