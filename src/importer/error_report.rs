// ==========================================
// 劳务管理控制台 - 错误报表导出
// ==========================================
// 职责: 错误列表 → 可下载的 CSV 文本
// 红线: 纯函数,落盘/下载由外围负责
// 注: 统一走 csv writer,消息内的逗号/引号按标准转义,可被再次解析
// ==========================================

use crate::domain::worker::ValidationError;
use crate::importer::error::ImportError;

/// 校验错误报表（表头: row,field,message）
pub fn render_validation_report(errors: &[ValidationError]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["row", "field", "message"])
        .map_err(|e| ImportError::ReportRenderError(e.to_string()))?;
    for error in errors {
        writer
            .write_record([error.row.to_string(), error.field.clone(), error.message.clone()])
            .map_err(|e| ImportError::ReportRenderError(e.to_string()))?;
    }
    finish(writer)
}

/// 导入失败报表（表头: row,message,块级错误无 field 列）
pub fn render_import_report(errors: &[ValidationError]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["row", "message"])
        .map_err(|e| ImportError::ReportRenderError(e.to_string()))?;
    for error in errors {
        writer
            .write_record([error.row.to_string(), error.message.clone()])
            .map_err(|e| ImportError::ReportRenderError(e.to_string()))?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ImportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::ReportRenderError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::ReportRenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_report_round_trip() {
        let errors = vec![
            ValidationError::header_level("hr_id", "Missing required column: hr_id"),
            ValidationError::new(7, "email_personal", "Invalid email format"),
            // 含逗号与引号的消息必须能无损往返
            ValidationError::new(9, "status", "Invalid status. Must be one of: \"pending\", active"),
        ];

        let report = render_validation_report(&errors).unwrap();

        let mut reader = csv::Reader::from_reader(report.as_bytes());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["row", "field", "message"]
        );
        let parsed: Vec<ValidationError> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                ValidationError::new(r[0].parse().unwrap(), &r[1], &r[2])
            })
            .collect();
        assert_eq!(parsed, errors);
    }

    #[test]
    fn test_import_report_has_no_field_column() {
        let errors = vec![ValidationError::new(0, "", "database timeout, retry later")];
        let report = render_import_report(&errors).unwrap();

        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("row,message"));
        assert_eq!(lines.next(), Some("0,\"database timeout, retry later\""));
    }

    #[test]
    fn test_empty_error_list_renders_header_only() {
        let report = render_validation_report(&[]).unwrap();
        assert_eq!(report.trim_end(), "row,field,message");
    }
}
