// ==========================================
// 劳务管理控制台 - 表头结构校验
// ==========================================
// 职责: 表头列与列契约比对
// 红线: 纯函数,不读行数据,不触发任何 I/O
// ==========================================

use crate::config::ImportProfile;
use crate::domain::worker::ValidationError;

/// 校验表头结构
///
/// # 参数
/// - header_columns: 解析出的表头列名
/// - profile: 导入配置（必填列 + 可选列）
///
/// # 返回
/// - Vec<ValidationError>: 表头错误（row = 1）,每个缺失必填列一条,
///   每个契约外的未知列一条
///
/// # 说明
/// 未知列会被判为错误而非忽略: 拼错的可选列名若被静默忽略,
/// 该列数据会在导入中悄悄丢失
pub fn validate_header(
    header_columns: &[String],
    profile: &ImportProfile,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // 缺失必填列
    for required in &profile.required_columns {
        if !header_columns.iter().any(|c| c == required) {
            errors.push(ValidationError::header_level(
                *required,
                format!("Missing required column: {}", required),
            ));
        }
    }

    // 契约外未知列
    for column in header_columns {
        if column.is_empty() {
            continue;
        }
        if !profile.is_known_column(column) {
            errors.push(ValidationError::header_level(
                column.clone(),
                format!("Unrecognized column: {}", column),
            ));
        }
    }

    errors
}
