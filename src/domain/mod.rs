// ==========================================
// 劳务管理控制台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含管道逻辑
// ==========================================

pub mod types;
pub mod worker;

// 重导出核心类型
pub use types::{EngagementModel, WizardStep, WorkerStatus};
pub use worker::{
    ChunkOutcome, ExistingWorkerKeys, ImportSummary, RawWorkerRow, ValidationError,
    ValidationOutcome, WorkerRecord,
};
