//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::GradekeeperError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 5000-5099: 设置错误
/// - 7000-7099: 通知错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,

    // 设置错误 5000-5099
    SettingNotFound = 5000,
    SettingValidationFailed = 5001,
    SettingUpdateFailed = 5002,

    // 通知错误 7000-7099
    NotifyFailed = 7000,
}

impl From<GradekeeperError> for ErrorCode {
    fn from(err: GradekeeperError) -> Self {
        match err {
            GradekeeperError::NotFound(_) => ErrorCode::SettingNotFound,
            GradekeeperError::Validation(_) | GradekeeperError::Coercion(_) => {
                ErrorCode::SettingValidationFailed
            }
            GradekeeperError::Transaction(_) => ErrorCode::SettingUpdateFailed,
            GradekeeperError::NotifyServer(_) => ErrorCode::NotifyFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}
