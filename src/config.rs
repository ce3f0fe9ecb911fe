//! 进程启动配置
//!
//! 只有无法放进数据库的引导参数从环境变量读取；其余可调项都在
//! settings 表里。

use std::env;

use crate::errors::{GradekeeperError, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// 管理面板的来源（CORS 白名单）
    pub dashboard_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| GradekeeperError::validation("SERVER_PORT 不是合法端口号"))?;
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://gradekeeper.db".to_string());
        let dashboard_origin =
            env::var("DASHBOARD_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_url,
            dashboard_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
