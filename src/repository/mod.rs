// ==========================================
// 劳务管理控制台 - 数据仓储层
// ==========================================
// 职责: 存储能力接口与实现
// 红线: 不含业务规则,只做数据访问
// ==========================================

pub mod error;
pub mod worker_store;
pub mod worker_store_impl;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use worker_store::WorkerStore;
pub use worker_store_impl::SqliteWorkerStore;
