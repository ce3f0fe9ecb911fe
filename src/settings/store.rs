//! 设置记录存储
//!
//! settings 表的持久化访问：连接管理、首次初始化（建表 + 种子数据）、
//! 按键读写。key 的唯一性由表约束保证；运行时更新永远不会创建新键，
//! 新键只能来自种子初始化。

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{info, warn};

use crate::errors::{GradekeeperError, Result};
use crate::settings::seed::SEED_SETTINGS;

use migration::{Migrator, MigratorTrait, entities::setting};

#[derive(Clone, Debug)]
pub struct SettingStore {
    db: DatabaseConnection,
}

impl SettingStore {
    /// 连接数据库并运行 schema 迁移
    pub async fn connect(database_url: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(GradekeeperError::database_config("DATABASE_URL 未设置"));
        }

        // 根据不同数据库类型配置连接选项
        let db = if database_url.starts_with("sqlite:") {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url).await?
        };

        let store = SettingStore { db };
        store.run_migrations().await?;

        Ok(store)
    }

    /// 复用已有连接（测试和嵌入场景）
    pub fn from_connection(db: DatabaseConnection) -> Self {
        SettingStore { db }
    }

    /// 连接 SQLite 数据库（带自动创建和性能优化）
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| GradekeeperError::database_config(format!("SQLite URL 解析失败: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            GradekeeperError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 连接通用数据库（MySQL/PostgreSQL）
    async fn connect_generic(database_url: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(20)
            .min_connections(2)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| GradekeeperError::database_connection(format!("无法连接到数据库: {}", e)))
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("迁移失败: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    /// 首次初始化：表已由迁移创建（if_not_exists），这里补种子数据。
    ///
    /// 幂等：表为空才插入种子集合，非空时不做任何事。每次进程启动都
    /// 可以安全调用。count 与 insert 在同一事务内执行；多副本并发首启时
    /// 仍存在跨连接的竞争窗口，由 key 唯一约束兜底（见 DESIGN.md）。
    pub async fn ensure_provisioned(&self) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradekeeperError::transaction(format!("开始事务失败: {}", e)))?;

        let count = setting::Entity::find()
            .count(&txn)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("统计设置行失败: {}", e)))?;

        if count > 0 {
            txn.rollback()
                .await
                .map_err(|e| GradekeeperError::transaction(format!("回滚事务失败: {}", e)))?;
            return Ok(());
        }

        let now = Utc::now();
        let rows: Vec<setting::ActiveModel> = SEED_SETTINGS
            .iter()
            .map(|def| setting::ActiveModel {
                key: Set(def.key.to_string()),
                value: Set(Some(def.default.to_string())),
                value_type: Set(def.value_type.to_string()),
                category: Set(Some(def.category.to_string())),
                description: Set(Some(def.description.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        setting::Entity::insert_many(rows)
            .exec(&txn)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("插入种子设置失败: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| GradekeeperError::transaction(format!("提交事务失败: {}", e)))?;

        info!("Seeded {} default settings", SEED_SETTINGS.len());
        Ok(())
    }

    /// 按键查找设置
    pub async fn get_by_key(&self, key: &str) -> Result<Option<setting::Model>> {
        setting::Entity::find()
            .filter(setting::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("查询设置失败: {}", e)))
    }

    /// 读取全部设置，可按分类过滤；按插入顺序返回
    pub async fn get_all(&self, category: Option<&str>) -> Result<Vec<setting::Model>> {
        let mut query = setting::Entity::find();
        if let Some(category) = category {
            query = query.filter(setting::Column::Category.eq(category));
        }
        query
            .order_by_asc(setting::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("加载设置失败: {}", e)))
    }

    /// 更新已注册键的值；键不存在时返回 NotFound，不会创建新键
    pub async fn upsert_value(&self, key: &str, raw: &str) -> Result<setting::Model> {
        let model = self
            .get_by_key(key)
            .await?
            .ok_or_else(|| GradekeeperError::not_found(format!("Setting '{}' not found", key)))?;

        let mut active: setting::ActiveModel = model.into();
        active.value = Set(Some(raw.to_string()));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("更新设置失败: {}", e)))?;

        info!("Setting updated: {}", key);
        Ok(updated)
    }

    /// 批量写入阶段：所有键值对在一个事务内落库，要么全部生效要么全不生效。
    ///
    /// 调用方负责事先完成校验；这里不再检查类型，键缺失视为存储层故障
    /// 并触发整体回滚。
    pub async fn apply_values(&self, accepted: &[(String, String)]) -> Result<Vec<setting::Model>> {
        if accepted.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradekeeperError::transaction(format!("开始事务失败: {}", e)))?;

        let now = Utc::now();
        for (key, raw) in accepted {
            let result = setting::Entity::update_many()
                .col_expr(setting::Column::Value, Expr::value(raw.clone()))
                .col_expr(setting::Column::UpdatedAt, Expr::value(now))
                .filter(setting::Column::Key.eq(key))
                .exec(&txn)
                .await
                .map_err(|e| GradekeeperError::transaction(format!("批量更新失败: {}", e)));

            match result {
                Ok(res) if res.rows_affected == 0 => {
                    txn.rollback().await.ok();
                    return Err(GradekeeperError::transaction(format!(
                        "批量更新中键消失: {}",
                        key
                    )));
                }
                Ok(_) => {}
                Err(e) => {
                    txn.rollback().await.ok();
                    return Err(e);
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| GradekeeperError::transaction(format!("提交事务失败: {}", e)))?;

        // 按提交顺序重新读取更新后的行
        let mut updated = Vec::with_capacity(accepted.len());
        for (key, _) in accepted {
            match self.get_by_key(key).await? {
                Some(model) => updated.push(model),
                None => warn!("Setting '{}' vanished after bulk update", key),
            }
        }

        info!("Bulk update applied to {} settings", updated.len());
        Ok(updated)
    }

    /// 撤销初始化：删除 settings 表（仅用于回滚/运维场景）
    pub async fn teardown(&self) -> Result<()> {
        Migrator::down(&self.db, None)
            .await
            .map_err(|e| GradekeeperError::database_operation(format!("回滚迁移失败: {}", e)))?;

        warn!("Settings relation dropped");
        Ok(())
    }
}
