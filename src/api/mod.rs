//! HTTP API 层
//!
//! 管理面板消费的 REST 接口：响应信封、错误码映射、设置端点与路由表。

pub mod error_code;
pub mod helpers;
pub mod routes;
pub mod settings_ops;
pub mod types;
