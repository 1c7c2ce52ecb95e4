// ==========================================
// 劳务管理控制台 - 批量导入层
// ==========================================
// 职责: CSV 批量导入管道（解析 → 校验 → 查重 → 分块落库 → 报表）
// 红线: 不含 UI 逻辑,所有存储访问走 WorkerStore 能力
// ==========================================

// 模块声明
pub mod batch_importer;
pub mod duplicate_detector;
pub mod error;
pub mod error_report;
pub mod field_validator;
pub mod file_parser;
pub mod structural_validator;
pub mod wizard;

// 重导出核心类型
pub use batch_importer::BatchImporter;
pub use duplicate_detector::DuplicateDetector;
pub use error::ImportError;
pub use error_report::{render_import_report, render_validation_report};
pub use field_validator::{RowValidation, RowValidator, WorkerRowValidator};
pub use file_parser::{CsvParser, ParsedTable, TableParser};
pub use structural_validator::validate_header;
pub use wizard::ImportWizard;
