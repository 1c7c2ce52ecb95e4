// ==========================================
// 劳务管理控制台 - 人员领域模型
// ==========================================
// 依据: workers 表结构与约束 (workers_status_requirements_check)
// 依据: 批量导入 CSV 列契约
// ==========================================

use crate::domain::types::{EngagementModel, WorkerStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ==========================================
// RawWorkerRow - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段校验 → WorkerRecord）
// 生命周期: 仅在导入流程内
// 注: 列顺序由 ParsedTable.header_columns 保留,此处只做按列名取值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWorkerRow {
    /// 列名 → 原始单元格文本
    pub fields: HashMap<String, String>,
    /// 源文件行号（1 起始,首行为表头,数据行从 2 开始）
    pub row_number: usize,
}

impl RawWorkerRow {
    pub fn new(fields: HashMap<String, String>, row_number: usize) -> Self {
        Self { fields, row_number }
    }

    /// 按列名取值并去除首尾空白,空白单元格视为缺失
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

// ==========================================
// WorkerRecord - 已通过全部行级规则的人员记录
// ==========================================
// 红线: 仅由 FieldValidator 在零错误时产出,管道各阶段不得部分填充
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    // ===== 标识 =====
    pub hr_id: String, // HR 编号（批次内与存量数据均需唯一,大小写不敏感）

    // ===== 基础信息 =====
    pub full_name: String,
    pub engagement_model: EngagementModel,
    pub worker_role: Option<String>,

    // ===== 邮箱（与 hr_id 同享唯一性约束）=====
    pub email_personal: String,
    pub email_pph: Option<String>,

    // ===== 地域与语言 =====
    pub country_residence: String,  // 两位大写 ISO 国家码
    pub locale_primary: String,
    pub locale_all: Vec<String>,    // 空单元格时回填 [locale_primary]

    // ===== 雇佣周期 =====
    pub hire_date: NaiveDate,
    pub rtw_datetime: Option<DateTime<Utc>>, // Ready-to-Work 时间
    pub termination_date: Option<NaiveDate>,
    pub bgc_expiration_date: Option<NaiveDate>, // 背调到期日

    // ===== 关联 =====
    pub supervisor_id: Option<Uuid>,

    // ===== 状态 =====
    pub status: WorkerStatus,
}

// ==========================================
// ValidationError - 校验/导入错误
// ==========================================
// 行号语义:
//   row = 0 → 文件级/批次级错误（无法归属到某一行）
//   row = 1 → 表头错误
//   row ≥ 2 → 数据行错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }

    /// 文件级错误（row = 0）
    pub fn file_level(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(0, field, message)
    }

    /// 表头错误（row = 1）
    pub fn header_level(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(1, field, message)
    }
}

// ==========================================
// ValidationOutcome - Validate 阶段产物
// ==========================================
// 不变量: errors 非空的行绝不出现在 valid 中
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// 通过全部校验（含查重）的干净记录
    pub valid: Vec<WorkerRecord>,
    /// 全部错误（结构 + 字段 + 重复 + 查询降级）
    pub errors: Vec<ValidationError>,
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
// 红线: total 恒等于提交导入的记录数,与各分块成败无关
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// 导入阶段错误（分块级错误 row = 0,无 field）
    pub errors: Vec<ValidationError>,
}

// ==========================================
// ExistingWorkerKeys - 存量查重键
// ==========================================
// 用途: Store.lookup_existing 的返回行（只取查重所需三列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingWorkerKeys {
    pub hr_id: String,
    pub email_personal: String,
    pub email_pph: Option<String>,
}

// ==========================================
// ChunkOutcome - 单分块持久化结果
// ==========================================
// 用途: Store.insert_many 的正常返回（分块整体异常走 Err 通道）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkOutcome {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<ValidationError>,
}
