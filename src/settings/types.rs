//! 设置类型定义模块
//!
//! 定义设置子系统的核心类型：逻辑值类型标签与解码后的值。

use serde::{Deserialize, Serialize};

/// 设置值类型枚举
///
/// 标识设置项在数据库和前端的逻辑类型。存储层统一保存文本，
/// 该标签决定文本如何被解析/渲染。封闭枚举，编译期排除非法标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    String,
    Number,
    Boolean,
    Json,
}

/// 解码后的逻辑值
///
/// 四种逻辑类型都能无损地落在 JSON 值域内，直接复用 serde_json::Value，
/// API 层无需再做一次转换。
pub type SettingValue = serde_json::Value;

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SettingType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown setting type: {}", s)),
        }
    }
}
