// ==========================================
// 劳务管理控制台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 人员批量导入管道（表单/看板等 UI 由外围承载）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 批量导入管道
pub mod importer;

// 配置层 - 导入参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EngagementModel, WizardStep, WorkerStatus};

// 领域实体
pub use domain::worker::{
    ChunkOutcome, ExistingWorkerKeys, ImportSummary, RawWorkerRow, ValidationError,
    ValidationOutcome, WorkerRecord,
};

// 配置
pub use config::ImportProfile;

// 导入管道
pub use importer::{
    BatchImporter, CsvParser, DuplicateDetector, ImportError, ImportWizard, ParsedTable,
    RowValidation, RowValidator, TableParser, WorkerRowValidator,
};

// 仓储
pub use repository::{RepositoryError, SqliteWorkerStore, WorkerStore};

// API
pub use api::{ApiError, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "劳务管理控制台";

// ==========================================
// 预编译检查
// ==========================================
