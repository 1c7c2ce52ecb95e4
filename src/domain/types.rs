// ==========================================
// 劳务管理控制台 - 领域类型定义
// ==========================================
// 依据: workers 表枚举约束 (engagement_model / status)
// 序列化格式: 小写 (与 CSV 模板和数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 用工模式 (Engagement Model)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementModel {
    Core,     // 核心编制
    Upwork,   // Upwork 外包
    External, // 外部供应商
    Internal, // 内部借调
}

impl EngagementModel {
    /// 合法取值表（用于校验消息）
    pub const ALL: [&'static str; 4] = ["core", "upwork", "external", "internal"];

    /// 解析 CSV 单元格取值（大小写不敏感）
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "core" => Some(EngagementModel::Core),
            "upwork" => Some(EngagementModel::Upwork),
            "external" => Some(EngagementModel::External),
            "internal" => Some(EngagementModel::Internal),
            _ => None,
        }
    }
}

impl fmt::Display for EngagementModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementModel::Core => write!(f, "core"),
            EngagementModel::Upwork => write!(f, "upwork"),
            EngagementModel::External => write!(f, "external"),
            EngagementModel::Internal => write!(f, "internal"),
        }
    }
}

// ==========================================
// 人员状态 (Worker Status)
// ==========================================
// 红线: 状态与日期字段联动约束见 FieldValidator
//   - pending    ⇒ rtw_datetime 与 termination_date 均为空
//   - active     ⇒ rtw_datetime 必填, termination_date 为空
//   - inactive   ⇒ 同 active
//   - terminated ⇒ rtw_datetime 与 termination_date 均必填
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Pending,    // 待入职
    Active,     // 在岗
    Inactive,   // 暂停
    Terminated, // 离职
}

impl WorkerStatus {
    /// 合法取值表（用于校验消息）
    pub const ALL: [&'static str; 4] = ["pending", "active", "inactive", "terminated"];

    /// 解析 CSV 单元格取值（大小写不敏感）
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(WorkerStatus::Pending),
            "active" => Some(WorkerStatus::Active),
            "inactive" => Some(WorkerStatus::Inactive),
            "terminated" => Some(WorkerStatus::Terminated),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerStatus::Pending => write!(f, "pending"),
            WorkerStatus::Active => write!(f, "active"),
            WorkerStatus::Inactive => write!(f, "inactive"),
            WorkerStatus::Terminated => write!(f, "terminated"),
        }
    }
}

// ==========================================
// 向导步骤 (Wizard Step)
// ==========================================
// 依据: 批量导入向导五步流程
// 红线: 不允许跳步,Import 为终态(仅 reset 可退出)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    Template, // 模板下载
    Upload,   // 文件上传
    Validate, // 数据校验
    Review,   // 预览确认
    Import,   // 导入执行
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Template => write!(f, "TEMPLATE"),
            WizardStep::Upload => write!(f, "UPLOAD"),
            WizardStep::Validate => write!(f, "VALIDATE"),
            WizardStep::Review => write!(f, "REVIEW"),
            WizardStep::Import => write!(f, "IMPORT"),
        }
    }
}
