// ==========================================
// 劳务管理控制台 - API 层
// ==========================================
// 职责: 进程内业务接口,供外围 UI 层调用
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::ApiError;
pub use import_api::ImportApi;
