// ==========================================
// 劳务管理控制台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 业务规则违规走 ValidationError 数据通道,本枚举只表达真实故障
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 向导状态机错误 =====
    #[error("无效的向导跳转: from={from} to={to}")]
    InvalidTransition { from: String, to: String },

    #[error("跳转前置条件不满足: {0}")]
    TransitionGuardFailed(String),

    // ===== 报表/模板错误 =====
    #[error("错误报表生成失败: {0}")]
    ReportRenderError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}
