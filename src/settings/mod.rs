//! 系统设置子系统
//!
//! 一张 key → 带类型标签文本值的设置表，外加：
//! - `types`/`coercion`: 封闭的四类值标签与文本 ↔ 逻辑值转换
//! - `seed`: 首次初始化的 31 项种子集合（单一数据源）
//! - `store`: 持久化与幂等初始化
//! - `service`: 读取、单键/批量更新与测试投递的业务入口

pub mod coercion;
pub mod seed;
pub mod service;
pub mod store;
pub mod types;

pub use service::{
    BulkUpdateOutcome, SettingFailure, SettingView, SettingsService, TestSendOutcome,
};
pub use store::SettingStore;
pub use types::{SettingType, SettingValue};
