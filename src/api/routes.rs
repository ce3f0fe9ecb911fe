//! API 路由配置

use actix_web::web;

use super::settings_ops::{
    bulk_update_settings, get_setting_views, get_settings, send_test_email, send_test_sms,
    update_setting,
};

/// 设置管理路由 `/settings`
///
/// 包含：
/// - GET /settings - 获取设置（可按 category 过滤）
/// - GET /settings/all - 获取设置完整视图
/// - PUT /settings/bulk - 批量更新
/// - POST /settings/test/email - 发送测试邮件
/// - POST /settings/test/sms - 发送测试短信
/// - PUT /settings/{key} - 更新单个设置
pub fn settings_routes() -> actix_web::Scope {
    web::scope("/settings")
        .route("", web::get().to(get_settings))
        // /all、/bulk 和 /test 必须注册在 /{key} 之前
        .route("/all", web::get().to(get_setting_views))
        .route("/bulk", web::put().to(bulk_update_settings))
        .route("/test/email", web::post().to(send_test_email))
        .route("/test/sms", web::post().to(send_test_sms))
        .route("/{key}", web::put().to(update_setting))
}

/// API v1 路由
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api").service(settings_routes())
}
