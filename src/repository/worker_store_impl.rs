// ==========================================
// 劳务管理控制台 - 人员存储 SQLite 实现
// ==========================================
// 职责: WorkerStore 的生产实现
// 红线: 分块写入事务化,块内任一行失败整块回滚
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::worker::{ChunkOutcome, ExistingWorkerKeys, WorkerRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::worker_store::WorkerStore;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

/// workers 表结构
///
/// 唯一性约束使用 NOCASE 排序规则,与管道的大小写不敏感查重口径一致
const WORKERS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS workers (
    hr_id               TEXT COLLATE NOCASE PRIMARY KEY,
    full_name           TEXT NOT NULL,
    engagement_model    TEXT NOT NULL,
    worker_role         TEXT,
    email_personal      TEXT COLLATE NOCASE NOT NULL UNIQUE,
    email_pph           TEXT COLLATE NOCASE UNIQUE,
    country_residence   TEXT NOT NULL,
    locale_primary      TEXT NOT NULL,
    locale_all          TEXT NOT NULL,
    hire_date           TEXT NOT NULL,
    rtw_datetime        TEXT,
    termination_date    TEXT,
    bgc_expiration_date TEXT,
    supervisor_id       TEXT,
    status              TEXT NOT NULL,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
)
"#;

// ==========================================
// SqliteWorkerStore
// ==========================================
pub struct SqliteWorkerStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteWorkerStore {
    /// 创建新的存储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 初始化 workers 表（幂等）
    pub fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(WORKERS_SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }
}

#[async_trait]
impl WorkerStore for SqliteWorkerStore {
    async fn lookup_existing(
        &self,
        hr_ids: &[String],
        emails: &[String],
    ) -> RepositoryResult<Vec<ExistingWorkerKeys>> {
        if hr_ids.is_empty() && emails.is_empty() {
            return Ok(Vec::new());
        }

        // 动态拼接 IN 子句（任一列表为空时省略对应条件）
        let mut clauses = Vec::new();
        let mut bind_values: Vec<String> = Vec::new();

        if !hr_ids.is_empty() {
            clauses.push(format!(
                "LOWER(hr_id) IN ({})",
                Self::placeholders(hr_ids.len())
            ));
            bind_values.extend(hr_ids.iter().map(|v| v.to_lowercase()));
        }
        if !emails.is_empty() {
            clauses.push(format!(
                "LOWER(email_personal) IN ({})",
                Self::placeholders(emails.len())
            ));
            bind_values.extend(emails.iter().map(|v| v.to_lowercase()));
            clauses.push(format!(
                "LOWER(email_pph) IN ({})",
                Self::placeholders(emails.len())
            ));
            bind_values.extend(emails.iter().map(|v| v.to_lowercase()));
        }

        let sql = format!(
            "SELECT hr_id, email_personal, email_pph FROM workers WHERE {}",
            clauses.join(" OR ")
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind_values.iter()), |row| {
            Ok(ExistingWorkerKeys {
                hr_id: row.get(0)?,
                email_personal: row.get(1)?,
                email_pph: row.get(2)?,
            })
        })?;

        let mut existing = Vec::new();
        for row in rows {
            existing.push(row?);
        }
        Ok(existing)
    }

    async fn insert_many(&self, records: &[WorkerRecord]) -> RepositoryResult<ChunkOutcome> {
        if records.is_empty() {
            return Ok(ChunkOutcome::default());
        }

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO workers (
                    hr_id, full_name, engagement_model, worker_role,
                    email_personal, email_pph, country_residence,
                    locale_primary, locale_all, hire_date, rtw_datetime,
                    termination_date, bgc_expiration_date, supervisor_id,
                    status, created_at, updated_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17
                )
                "#,
            )?;

            let now = Utc::now().to_rfc3339();
            for record in records {
                let locale_all = serde_json::to_string(&record.locale_all).map_err(|e| {
                    RepositoryError::FieldEncodingError {
                        field: "locale_all".to_string(),
                        message: e.to_string(),
                    }
                })?;

                // 块内任一行失败 → ? 提前返回 → 事务随 drop 回滚
                stmt.execute(params![
                    record.hr_id,
                    record.full_name,
                    record.engagement_model.to_string(),
                    record.worker_role,
                    record.email_personal,
                    record.email_pph,
                    record.country_residence,
                    record.locale_primary,
                    locale_all,
                    record.hire_date.to_string(),
                    record.rtw_datetime.map(|d| d.to_rfc3339()),
                    record.termination_date.map(|d| d.to_string()),
                    record.bgc_expiration_date.map(|d| d.to_string()),
                    record.supervisor_id.map(|u| u.to_string()),
                    record.status.to_string(),
                    now,
                    now,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(ChunkOutcome {
            success: records.len(),
            failed: 0,
            errors: Vec::new(),
        })
    }
}
