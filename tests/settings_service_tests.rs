use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use gradekeeper::errors::{GradekeeperError, Result};
use gradekeeper::notify::{EmailConfig, LogNotifier, Notifier, SmsConfig};
use gradekeeper::settings::seed::keys;
use gradekeeper::settings::{SettingStore, SettingValue, SettingsService};

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

async fn memory_service() -> SettingsService {
    memory_service_with(Arc::new(LogNotifier)).await
}

async fn memory_service_with(notifier: Arc<dyn Notifier>) -> SettingsService {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect sqlite memory");
    Migrator::up(&db, None).await.expect("run migrations");

    let store = SettingStore::from_connection(db);
    store.ensure_provisioned().await.expect("provision settings");
    SettingsService::new(store, notifier)
}

fn changes(pairs: &[(&str, SettingValue)]) -> BTreeMap<String, SettingValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// 总是失败的协作方，用于验证回执如实转述
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_email(
        &self,
        _config: &EmailConfig,
        _to: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<String> {
        Err(GradekeeperError::notify_server("gateway refused connection"))
    }

    async fn send_sms(&self, _config: &SmsConfig, _to: &str, _body: &str) -> Result<String> {
        Err(GradekeeperError::notify_server("gateway refused connection"))
    }
}

#[tokio::test]
async fn test_fetch_returns_decoded_values() {
    let service = memory_service().await;

    let map = service.fetch(None).await.unwrap();
    assert_eq!(map.len(), 31);
    assert_eq!(map[keys::SMTP_PORT], json!(587));
    assert_eq!(map[keys::REQUIRE_STRONG_PASSWORD], json!(true));
    assert_eq!(map[keys::APP_NAME], json!("Gradekeeper"));
}

#[tokio::test]
async fn test_fetch_category_filter_returns_exactly_email_keys() {
    let service = memory_service().await;

    let map = service.fetch(Some("email")).await.unwrap();
    let mut got: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
    got.sort_unstable();
    let mut want = vec![
        keys::EMAIL_ENABLED,
        keys::EMAIL_PROVIDER,
        keys::SMTP_HOST,
        keys::SMTP_PORT,
        keys::SMTP_USERNAME,
        keys::SMTP_PASSWORD,
        keys::SMTP_FROM_EMAIL,
        keys::SMTP_FROM_NAME,
        keys::EMAIL_ENCRYPTION,
    ];
    want.sort_unstable();
    assert_eq!(got, want);
}

#[tokio::test]
async fn test_update_one_decodes_result() {
    let service = memory_service().await;

    let view = service
        .update_one(keys::SMTP_PORT, &json!(2525))
        .await
        .unwrap();
    assert_eq!(view.key, keys::SMTP_PORT);
    assert_eq!(view.value, json!(2525));

    // 表单风格的字符串提交同样接受
    let view = service
        .update_one(keys::SMS_ENABLED, &json!("true"))
        .await
        .unwrap();
    assert_eq!(view.value, json!(true));
}

#[tokio::test]
async fn test_update_one_rejects_unknown_key() {
    let service = memory_service().await;

    let err = service
        .update_one("doesNotExist", &json!("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, GradekeeperError::NotFound(_)));

    // 存储状态不变
    assert_eq!(service.fetch(None).await.unwrap().len(), 31);
}

#[tokio::test]
async fn test_update_one_rejects_type_mismatch() {
    let service = memory_service().await;

    let err = service
        .update_one(keys::SMTP_PORT, &json!("not-a-number"))
        .await
        .unwrap_err();
    assert!(matches!(err, GradekeeperError::Coercion(_)));

    let map = service.fetch(Some("email")).await.unwrap();
    assert_eq!(map[keys::SMTP_PORT], json!(587));
}

#[tokio::test]
async fn test_update_bulk_skips_unknown_keys() {
    let service = memory_service().await;

    let outcome = service
        .update_bulk(&changes(&[
            ("nonexistentKey", json!("x")),
            (keys::SMTP_PORT, json!("25")),
        ]))
        .await
        .unwrap();

    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].key, keys::SMTP_PORT);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].key, "nonexistentKey");

    let map = service.fetch(None).await.unwrap();
    assert_eq!(map[keys::SMTP_PORT], json!(25));
    assert!(!map.contains_key("nonexistentKey"));
}

#[tokio::test]
async fn test_update_bulk_isolates_type_violations() {
    let service = memory_service().await;

    let outcome = service
        .update_bulk(&changes(&[
            (keys::SMTP_PORT, json!("not-a-number")),
            (keys::SMS_ENABLED, json!("true")),
        ]))
        .await
        .unwrap();

    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].key, keys::SMS_ENABLED);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].key, keys::SMTP_PORT);

    // smsEnabled 已持久化，smtpPort 保持原值
    let map = service.fetch(None).await.unwrap();
    assert_eq!(map[keys::SMS_ENABLED], json!(true));
    assert_eq!(map[keys::SMTP_PORT], json!(587));
}

#[tokio::test]
async fn test_update_bulk_with_only_bad_keys_applies_nothing() {
    let service = memory_service().await;

    let outcome = service
        .update_bulk(&changes(&[
            ("ghost", json!(1)),
            (keys::SMTP_PORT, json!(true)),
        ]))
        .await
        .unwrap();

    assert!(outcome.updated.is_empty());
    assert_eq!(outcome.failed.len(), 2);
}

#[tokio::test]
async fn test_fetch_degrades_corrupt_row_to_raw_text() {
    let service = memory_service().await;

    // 绕过校验直接写入坏值（apply_values 不做类型检查）
    service
        .store()
        .apply_values(&[(keys::SMTP_PORT.to_string(), "oops".to_string())])
        .await
        .unwrap();

    let map = service.fetch(None).await.unwrap();
    // 只有坏行退化为原始文本，其余照常解码
    assert_eq!(map[keys::SMTP_PORT], Value::String("oops".to_string()));
    assert_eq!(map[keys::SESSION_TIMEOUT], json!(30));
    assert_eq!(map.len(), 31);
}

#[tokio::test]
async fn test_send_test_email_refuses_when_disabled() {
    let service = memory_service().await;

    let outcome = service
        .send_test_email("head@school.test", None, None)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Email sending is disabled");
}

#[tokio::test]
async fn test_send_test_email_reports_collaborator_receipt() {
    let service = memory_service().await;
    service
        .update_one(keys::EMAIL_ENABLED, &json!(true))
        .await
        .unwrap();

    let outcome = service
        .send_test_email("head@school.test", Some("hello"), None)
        .await
        .unwrap();
    assert!(outcome.success);
    assert!(outcome.message.contains("head@school.test"));
}

#[tokio::test]
async fn test_send_test_email_reports_collaborator_failure() {
    let service = memory_service_with(Arc::new(FailingNotifier)).await;
    service
        .update_one(keys::EMAIL_ENABLED, &json!(true))
        .await
        .unwrap();

    let outcome = service
        .send_test_email("head@school.test", None, None)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "gateway refused connection");
}

#[tokio::test]
async fn test_send_test_sms_refuses_when_disabled() {
    let service = memory_service().await;

    let outcome = service.send_test_sms("+15550100", None).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "SMS sending is disabled");
}

#[tokio::test]
async fn test_send_test_sms_reports_collaborator_receipt() {
    let service = memory_service().await;
    service
        .update_one(keys::SMS_ENABLED, &json!(true))
        .await
        .unwrap();

    let outcome = service.send_test_sms("+15550100", None).await.unwrap();
    assert!(outcome.success);
    assert!(outcome.message.contains("+15550100"));
}
