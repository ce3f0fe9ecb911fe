//! 类型转换层
//!
//! 存储层只保存文本，这里负责文本与逻辑值之间的双向映射。
//! 核心不变量：`decode(encode(v, t), t) == v` 对所有合法的 v 成立，
//! 存储层依赖该往返保证。

use serde_json::Value;

use super::types::{SettingType, SettingValue};
use crate::errors::{GradekeeperError, Result};

/// 将存储文本按类型标签解码为逻辑值
pub fn decode(raw: &str, ty: SettingType) -> Result<SettingValue> {
    match ty {
        SettingType::String => Ok(Value::String(raw.to_string())),
        SettingType::Number => raw
            .parse::<serde_json::Number>()
            .map(Value::Number)
            .map_err(|_| {
                GradekeeperError::coercion(format!("'{}' is not a base-10 number", raw))
            }),
        // 只接受字面量 true/false，大小写敏感
        SettingType::Boolean => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(GradekeeperError::coercion(format!(
                "'{}' is not a boolean literal (expected 'true' or 'false')",
                raw
            ))),
        },
        SettingType::Json => serde_json::from_str(raw)
            .map_err(|e| GradekeeperError::coercion(format!("malformed JSON: {}", e))),
    }
}

/// 将逻辑值按类型标签编码为存储文本（decode 的逆操作）
pub fn encode(value: &SettingValue, ty: SettingType) -> Result<String> {
    match (ty, value) {
        (SettingType::String, Value::String(s)) => Ok(s.clone()),
        (SettingType::Number, Value::Number(n)) => Ok(n.to_string()),
        (SettingType::Boolean, Value::Bool(b)) => Ok(b.to_string()),
        (SettingType::Json, v) => {
            serde_json::to_string(v).map_err(GradekeeperError::from)
        }
        (ty, other) => Err(GradekeeperError::coercion(format!(
            "expected a {} value, got {}",
            ty,
            json_kind(other)
        ))),
    }
}

/// 将调用方提交的值规整为存储文本
///
/// 管理后台的表单把所有值当字符串提交（"587"、"true"），这里对
/// number/boolean 额外接受其文本形态：先按类型解码验证，再原样落库。
/// 其余情况走严格的 encode。
pub fn normalize(value: &SettingValue, ty: SettingType) -> Result<String> {
    if let Value::String(raw) = value {
        match ty {
            SettingType::Number | SettingType::Boolean => {
                decode(raw, ty)?;
                return Ok(raw.clone());
            }
            SettingType::String => return Ok(raw.clone()),
            SettingType::Json => {}
        }
    }
    encode(value, ty)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
