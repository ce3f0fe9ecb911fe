//! 种子设置定义模块 - 单一数据源
//!
//! 全部 31 个默认设置项的元信息都在这里定义，包括：
//! - key 字符串
//! - 逻辑值类型
//! - 默认值
//! - 分类与描述
//!
//! 首次初始化（provisioning）从这里读取种子集合；其他模块不得
//! 另行定义设置元信息。

use super::types::SettingType;

/// 设置分类常量
pub mod categories {
    pub const GENERAL: &str = "general";
    pub const EMAIL: &str = "email";
    pub const SMS: &str = "sms";
    pub const SECURITY: &str = "security";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const BACKUP: &str = "backup";
}

/// Key 常量
pub mod keys {
    // 通用
    pub const APP_NAME: &str = "appName";
    pub const APP_URL: &str = "appUrl";
    pub const TIMEZONE: &str = "timezone";
    pub const DATE_FORMAT: &str = "dateFormat";
    pub const CURRENCY: &str = "currency";
    pub const LANGUAGE: &str = "language";

    // 邮件
    pub const EMAIL_ENABLED: &str = "emailEnabled";
    pub const EMAIL_PROVIDER: &str = "emailProvider";
    pub const SMTP_HOST: &str = "smtpHost";
    pub const SMTP_PORT: &str = "smtpPort";
    pub const SMTP_USERNAME: &str = "smtpUsername";
    pub const SMTP_PASSWORD: &str = "smtpPassword";
    pub const SMTP_FROM_EMAIL: &str = "smtpFromEmail";
    pub const SMTP_FROM_NAME: &str = "smtpFromName";
    pub const EMAIL_ENCRYPTION: &str = "emailEncryption";

    // 短信
    pub const SMS_ENABLED: &str = "smsEnabled";
    pub const SMS_PROVIDER: &str = "smsProvider";
    pub const SMS_API_KEY: &str = "smsApiKey";
    pub const SMS_API_SECRET: &str = "smsApiSecret";
    pub const SMS_SENDER_ID: &str = "smsSenderId";

    // 安全
    pub const SESSION_TIMEOUT: &str = "sessionTimeout";
    pub const PASSWORD_MIN_LENGTH: &str = "passwordMinLength";
    pub const REQUIRE_STRONG_PASSWORD: &str = "requireStrongPassword";
    pub const ENABLE_TWO_FACTOR: &str = "enableTwoFactor";
    pub const MAX_LOGIN_ATTEMPTS: &str = "maxLoginAttempts";

    // 通知
    pub const ENABLE_EMAIL_NOTIFICATIONS: &str = "enableEmailNotifications";
    pub const ENABLE_SMS_NOTIFICATIONS: &str = "enableSmsNotifications";
    pub const ENABLE_PUSH_NOTIFICATIONS: &str = "enablePushNotifications";

    // 备份
    pub const AUTO_BACKUP_ENABLED: &str = "autoBackupEnabled";
    pub const BACKUP_FREQUENCY: &str = "backupFrequency";
    pub const BACKUP_RETENTION_DAYS: &str = "backupRetentionDays";
}

/// 种子设置项完整定义
pub struct SettingDef {
    /// 设置键，如 "smtpPort"
    pub key: &'static str,
    /// 逻辑值类型
    pub value_type: SettingType,
    /// 默认值（存储文本形态）
    pub default: &'static str,
    /// 设置分类
    pub category: &'static str,
    /// 描述（英文）
    pub description: &'static str,
}

/// 首次初始化插入的全部种子设置
pub const SEED_SETTINGS: &[SettingDef] = &[
    // ===== general =====
    SettingDef {
        key: keys::APP_NAME,
        value_type: SettingType::String,
        default: "Gradekeeper",
        category: categories::GENERAL,
        description: "Display name of the school administration platform",
    },
    SettingDef {
        key: keys::APP_URL,
        value_type: SettingType::String,
        default: "http://localhost:3000",
        category: categories::GENERAL,
        description: "Public base URL of the admin dashboard",
    },
    SettingDef {
        key: keys::TIMEZONE,
        value_type: SettingType::String,
        default: "UTC",
        category: categories::GENERAL,
        description: "Default timezone for reports and schedules",
    },
    SettingDef {
        key: keys::DATE_FORMAT,
        value_type: SettingType::String,
        default: "YYYY-MM-DD",
        category: categories::GENERAL,
        description: "Date display format used across the dashboard",
    },
    SettingDef {
        key: keys::CURRENCY,
        value_type: SettingType::String,
        default: "USD",
        category: categories::GENERAL,
        description: "Currency code for fee management",
    },
    SettingDef {
        key: keys::LANGUAGE,
        value_type: SettingType::String,
        default: "en",
        category: categories::GENERAL,
        description: "Default interface language",
    },
    // ===== email =====
    SettingDef {
        key: keys::EMAIL_ENABLED,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::EMAIL,
        description: "Whether outbound email is enabled",
    },
    SettingDef {
        key: keys::EMAIL_PROVIDER,
        value_type: SettingType::String,
        default: "smtp",
        category: categories::EMAIL,
        description: "Email delivery provider",
    },
    SettingDef {
        key: keys::SMTP_HOST,
        value_type: SettingType::String,
        default: "",
        category: categories::EMAIL,
        description: "SMTP server hostname",
    },
    SettingDef {
        key: keys::SMTP_PORT,
        value_type: SettingType::Number,
        default: "587",
        category: categories::EMAIL,
        description: "SMTP server port",
    },
    SettingDef {
        key: keys::SMTP_USERNAME,
        value_type: SettingType::String,
        default: "",
        category: categories::EMAIL,
        description: "SMTP authentication username",
    },
    SettingDef {
        key: keys::SMTP_PASSWORD,
        value_type: SettingType::String,
        default: "",
        category: categories::EMAIL,
        description: "SMTP authentication password",
    },
    SettingDef {
        key: keys::SMTP_FROM_EMAIL,
        value_type: SettingType::String,
        default: "",
        category: categories::EMAIL,
        description: "From address for outbound email",
    },
    SettingDef {
        key: keys::SMTP_FROM_NAME,
        value_type: SettingType::String,
        default: "Gradekeeper",
        category: categories::EMAIL,
        description: "From display name for outbound email",
    },
    SettingDef {
        key: keys::EMAIL_ENCRYPTION,
        value_type: SettingType::String,
        default: "tls",
        category: categories::EMAIL,
        description: "SMTP transport encryption (tls/ssl/none)",
    },
    // ===== sms =====
    SettingDef {
        key: keys::SMS_ENABLED,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::SMS,
        description: "Whether outbound SMS is enabled",
    },
    SettingDef {
        key: keys::SMS_PROVIDER,
        value_type: SettingType::String,
        default: "twilio",
        category: categories::SMS,
        description: "SMS gateway provider",
    },
    SettingDef {
        key: keys::SMS_API_KEY,
        value_type: SettingType::String,
        default: "",
        category: categories::SMS,
        description: "SMS gateway API key",
    },
    SettingDef {
        key: keys::SMS_API_SECRET,
        value_type: SettingType::String,
        default: "",
        category: categories::SMS,
        description: "SMS gateway API secret",
    },
    SettingDef {
        key: keys::SMS_SENDER_ID,
        value_type: SettingType::String,
        default: "",
        category: categories::SMS,
        description: "Sender ID shown on outbound SMS",
    },
    // ===== security =====
    SettingDef {
        key: keys::SESSION_TIMEOUT,
        value_type: SettingType::Number,
        default: "30",
        category: categories::SECURITY,
        description: "Idle session timeout in minutes",
    },
    SettingDef {
        key: keys::PASSWORD_MIN_LENGTH,
        value_type: SettingType::Number,
        default: "8",
        category: categories::SECURITY,
        description: "Minimum password length for staff accounts",
    },
    SettingDef {
        key: keys::REQUIRE_STRONG_PASSWORD,
        value_type: SettingType::Boolean,
        default: "true",
        category: categories::SECURITY,
        description: "Require mixed-case, digit and symbol in passwords",
    },
    SettingDef {
        key: keys::ENABLE_TWO_FACTOR,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::SECURITY,
        description: "Require a second factor at login",
    },
    SettingDef {
        key: keys::MAX_LOGIN_ATTEMPTS,
        value_type: SettingType::Number,
        default: "5",
        category: categories::SECURITY,
        description: "Failed login attempts before lockout",
    },
    // ===== notifications =====
    SettingDef {
        key: keys::ENABLE_EMAIL_NOTIFICATIONS,
        value_type: SettingType::Boolean,
        default: "true",
        category: categories::NOTIFICATIONS,
        description: "Send system notifications by email",
    },
    SettingDef {
        key: keys::ENABLE_SMS_NOTIFICATIONS,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::NOTIFICATIONS,
        description: "Send system notifications by SMS",
    },
    SettingDef {
        key: keys::ENABLE_PUSH_NOTIFICATIONS,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::NOTIFICATIONS,
        description: "Send system notifications as push messages",
    },
    // ===== backup =====
    SettingDef {
        key: keys::AUTO_BACKUP_ENABLED,
        value_type: SettingType::Boolean,
        default: "false",
        category: categories::BACKUP,
        description: "Run scheduled database backups",
    },
    SettingDef {
        key: keys::BACKUP_FREQUENCY,
        value_type: SettingType::String,
        default: "daily",
        category: categories::BACKUP,
        description: "Backup schedule (hourly/daily/weekly)",
    },
    SettingDef {
        key: keys::BACKUP_RETENTION_DAYS,
        value_type: SettingType::Number,
        default: "30",
        category: categories::BACKUP,
        description: "Days to keep old backups before pruning",
    },
];

/// 按 key 查找种子定义
pub fn get_def(key: &str) -> Option<&'static SettingDef> {
    SEED_SETTINGS.iter().find(|def| def.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::coercion;
    use std::collections::HashSet;

    #[test]
    fn test_seed_has_exactly_31_rows() {
        assert_eq!(SEED_SETTINGS.len(), 31);
    }

    #[test]
    fn test_seed_keys_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for def in SEED_SETTINGS {
            assert!(!def.key.is_empty());
            assert!(seen.insert(def.key), "duplicate seed key: {}", def.key);
        }
    }

    #[test]
    fn test_seed_defaults_decode_against_declared_type() {
        for def in SEED_SETTINGS {
            coercion::decode(def.default, def.value_type).unwrap_or_else(|e| {
                panic!("seed default for '{}' does not decode: {}", def.key, e)
            });
        }
    }

    #[test]
    fn test_email_category_members() {
        let email: Vec<&str> = SEED_SETTINGS
            .iter()
            .filter(|d| d.category == categories::EMAIL)
            .map(|d| d.key)
            .collect();
        assert_eq!(
            email,
            vec![
                keys::EMAIL_ENABLED,
                keys::EMAIL_PROVIDER,
                keys::SMTP_HOST,
                keys::SMTP_PORT,
                keys::SMTP_USERNAME,
                keys::SMTP_PASSWORD,
                keys::SMTP_FROM_EMAIL,
                keys::SMTP_FROM_NAME,
                keys::EMAIL_ENCRYPTION,
            ]
        );
    }

    #[test]
    fn test_get_def() {
        let def = get_def(keys::SMTP_PORT).unwrap();
        assert_eq!(def.value_type, crate::settings::SettingType::Number);
        assert_eq!(def.category, categories::EMAIL);
        assert!(get_def("doesNotExist").is_none());
    }
}
