use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum GradekeeperError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Transaction(String),
    Validation(String),
    Coercion(String),
    NotFound(String),
    Serialization(String),
    NotifyServer(String),
}

impl GradekeeperError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GradekeeperError::DatabaseConfig(_) => "E001",
            GradekeeperError::DatabaseConnection(_) => "E002",
            GradekeeperError::DatabaseOperation(_) => "E003",
            GradekeeperError::Transaction(_) => "E004",
            GradekeeperError::Validation(_) => "E005",
            GradekeeperError::Coercion(_) => "E006",
            GradekeeperError::NotFound(_) => "E007",
            GradekeeperError::Serialization(_) => "E008",
            GradekeeperError::NotifyServer(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GradekeeperError::DatabaseConfig(_) => "Database Configuration Error",
            GradekeeperError::DatabaseConnection(_) => "Database Connection Error",
            GradekeeperError::DatabaseOperation(_) => "Database Operation Error",
            GradekeeperError::Transaction(_) => "Transaction Error",
            GradekeeperError::Validation(_) => "Validation Error",
            GradekeeperError::Coercion(_) => "Type Coercion Error",
            GradekeeperError::NotFound(_) => "Resource Not Found",
            GradekeeperError::Serialization(_) => "Serialization Error",
            GradekeeperError::NotifyServer(_) => "Notify Server Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GradekeeperError::DatabaseConfig(msg) => msg,
            GradekeeperError::DatabaseConnection(msg) => msg,
            GradekeeperError::DatabaseOperation(msg) => msg,
            GradekeeperError::Transaction(msg) => msg,
            GradekeeperError::Validation(msg) => msg,
            GradekeeperError::Coercion(msg) => msg,
            GradekeeperError::NotFound(msg) => msg,
            GradekeeperError::Serialization(msg) => msg,
            GradekeeperError::NotifyServer(msg) => msg,
        }
    }

    /// 映射 HTTP 状态码（供 API 层使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            GradekeeperError::NotFound(_) => StatusCode::NOT_FOUND,
            GradekeeperError::Validation(_) | GradekeeperError::Coercion(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动日志）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GradekeeperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradekeeperError {}

// 便捷的构造函数
impl GradekeeperError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::DatabaseOperation(msg.into())
    }

    pub fn transaction<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::Transaction(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::Validation(msg.into())
    }

    pub fn coercion<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::Coercion(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::Serialization(msg.into())
    }

    pub fn notify_server<T: Into<String>>(msg: T) -> Self {
        GradekeeperError::NotifyServer(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradekeeperError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradekeeperError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GradekeeperError {
    fn from(err: serde_json::Error) -> Self {
        GradekeeperError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradekeeperError>;
