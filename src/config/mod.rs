// ==========================================
// 劳务管理控制台 - 配置层
// ==========================================
// 职责: 导入管道参数配置
// ==========================================

pub mod import_profile;

// 重导出核心配置类型
pub use import_profile::{ImportProfile, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ROWS};
