// ==========================================
// 劳务管理控制台 - 行级字段校验器
// ==========================================
// 依据: workers 表约束 (workers_status_requirements_check)
// 职责: 单行必填/格式/跨字段规则校验 + 归一化
// 红线: 全函数纯计算,不读外部状态（查重在 DuplicateDetector 单独做）
// 红线: 产出二选一 —— 要么完整 WorkerRecord,要么错误列表,绝无部分产物
// ==========================================

use crate::config::ImportProfile;
use crate::domain::types::{EngagementModel, WorkerStatus};
use crate::domain::worker::{RawWorkerRow, ValidationError, WorkerRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

// ==========================================
// RowValidation - 行校验产物
// ==========================================
#[derive(Debug, Clone)]
pub enum RowValidation {
    /// 零错误,产出归一化记录
    Valid(WorkerRecord),
    /// 至少一条错误,该行被排除
    Invalid(Vec<ValidationError>),
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 行校验接口,向导只依赖本接口（规则集可按实体替换）
// 实现者: WorkerRowValidator
pub trait RowValidator: Send + Sync {
    fn validate(&self, row: &RawWorkerRow) -> RowValidation;
}

// ==========================================
// WorkerRowValidator - 人员行校验器
// ==========================================
pub struct WorkerRowValidator {
    required_columns: Vec<&'static str>,
}

impl WorkerRowValidator {
    pub fn new(profile: &ImportProfile) -> Self {
        Self {
            required_columns: profile.required_columns.clone(),
        }
    }
}

impl RowValidator for WorkerRowValidator {
    /// 校验一行并归一化
    ///
    /// # 规则顺序
    /// 1. 必填列非空（trim 后）
    /// 2. 单字段格式: 邮箱、国家码、日期、时间戳、枚举、UUID
    /// 3. 跨字段规则（仅当 1/2 零错误时执行,避免对同一字段重复报错）:
    ///    - pending    → rtw_datetime / termination_date 必须为空
    ///    - active     → rtw_datetime 必填, termination_date 必须为空
    ///    - inactive   → 同 active
    ///    - terminated → rtw_datetime / termination_date 均必填
    fn validate(&self, row: &RawWorkerRow) -> RowValidation {
        let n = row.row_number;
        let mut errors = Vec::new();

        // === 规则 1: 必填列非空 ===
        for &column in &self.required_columns {
            if row.get(column).is_none() {
                errors.push(ValidationError::new(
                    n,
                    column,
                    format!("{} is required", column),
                ));
            }
        }

        // === 规则 2: 单字段格式 ===
        if let Some(email) = row.get("email_personal") {
            if !is_valid_email(email) {
                errors.push(ValidationError::new(n, "email_personal", "Invalid email format"));
            }
        }

        if let Some(email) = row.get("email_pph") {
            if !is_valid_email(email) {
                errors.push(ValidationError::new(n, "email_pph", "Invalid email format"));
            }
        }

        let engagement_model = row.get("engagement_model").and_then(|token| {
            let parsed = EngagementModel::from_token(token);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "engagement_model",
                    format!(
                        "Invalid engagement model. Must be one of: {}",
                        EngagementModel::ALL.join(", ")
                    ),
                ));
            }
            parsed
        });

        let status = row.get("status").and_then(|token| {
            let parsed = WorkerStatus::from_token(token);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "status",
                    format!(
                        "Invalid status. Must be one of: {}",
                        WorkerStatus::ALL.join(", ")
                    ),
                ));
            }
            parsed
        });

        if let Some(name) = row.get("full_name") {
            if name.chars().count() < 2 {
                errors.push(ValidationError::new(
                    n,
                    "full_name",
                    "full_name must be at least 2 characters",
                ));
            }
        }

        if let Some(country) = row.get("country_residence") {
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                errors.push(ValidationError::new(
                    n,
                    "country_residence",
                    "Country must be 2-letter ISO code (e.g., US, CA, MX)",
                ));
            }
        }

        let hire_date = row.get("hire_date").and_then(|value| {
            let parsed = parse_iso_date(value);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "hire_date",
                    "Invalid date format. Use YYYY-MM-DD",
                ));
            }
            parsed
        });

        let rtw_datetime = row.get("rtw_datetime").and_then(|value| {
            let parsed = parse_iso_datetime(value);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "rtw_datetime",
                    "Invalid datetime format. Use ISO format (e.g., 2024-06-15T09:00:00Z)",
                ));
            }
            parsed
        });

        let termination_date = row.get("termination_date").and_then(|value| {
            let parsed = parse_iso_date(value);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "termination_date",
                    "Invalid date format. Use YYYY-MM-DD",
                ));
            }
            parsed
        });

        let bgc_expiration_date = row.get("bgc_expiration_date").and_then(|value| {
            let parsed = parse_iso_date(value);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "bgc_expiration_date",
                    "Invalid date format. Use YYYY-MM-DD",
                ));
            }
            parsed
        });

        let supervisor_id = row.get("supervisor_id").and_then(|value| {
            let parsed = Uuid::parse_str(value).ok();
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    n,
                    "supervisor_id",
                    "supervisor_id must be a valid UUID",
                ));
            }
            parsed
        });

        // === 规则 3: 跨字段规则（仅在前两步零错误时执行） ===
        // 零错误时必填字段必然全部解析成功,在此一次性解构
        if let (true, Some(status), Some(engagement_model), Some(hire_date)) =
            (errors.is_empty(), status, engagement_model, hire_date)
        {
            let rtw_present = row.get("rtw_datetime").is_some();
            let termination_present = row.get("termination_date").is_some();

            match status {
                WorkerStatus::Pending => {
                    if rtw_present {
                        errors.push(ValidationError::new(
                            n,
                            "rtw_datetime",
                            "Pending workers must not have rtw_datetime set",
                        ));
                    }
                    if termination_present {
                        errors.push(ValidationError::new(
                            n,
                            "termination_date",
                            "Pending workers must not have termination_date set",
                        ));
                    }
                }
                WorkerStatus::Active | WorkerStatus::Inactive => {
                    if !rtw_present {
                        errors.push(ValidationError::new(
                            n,
                            "rtw_datetime",
                            format!("{} workers must have rtw_datetime set", status),
                        ));
                    }
                    if termination_present {
                        errors.push(ValidationError::new(
                            n,
                            "termination_date",
                            format!("{} workers must not have termination_date set", status),
                        ));
                    }
                }
                WorkerStatus::Terminated => {
                    if !rtw_present {
                        errors.push(ValidationError::new(
                            n,
                            "rtw_datetime",
                            "Terminated workers must have rtw_datetime set",
                        ));
                    }
                    if !termination_present {
                        errors.push(ValidationError::new(
                            n,
                            "termination_date",
                            "Terminated workers must have termination_date set",
                        ));
                    }
                }
            }

            if errors.is_empty() {
                // === 归一化产出 ===
                let locale_primary = row.get("locale_primary").unwrap_or_default().to_string();
                let locale_all = parse_locale_all(row.get("locale_all"), &locale_primary);

                return RowValidation::Valid(WorkerRecord {
                    hr_id: row.get("hr_id").unwrap_or_default().to_string(),
                    full_name: row.get("full_name").unwrap_or_default().to_string(),
                    engagement_model,
                    worker_role: row.get("worker_role").map(str::to_string),
                    email_personal: row.get("email_personal").unwrap_or_default().to_string(),
                    email_pph: row.get("email_pph").map(str::to_string),
                    country_residence: row
                        .get("country_residence")
                        .unwrap_or_default()
                        .to_ascii_uppercase(),
                    locale_primary,
                    locale_all,
                    hire_date,
                    rtw_datetime,
                    termination_date,
                    bgc_expiration_date,
                    supervisor_id,
                    status,
                });
            }
        }

        RowValidation::Invalid(errors)
    }
}

// ==========================================
// 辅助函数: 格式解析
// ==========================================

/// 邮箱格式: local@domain,domain 含点分且不以点开头/结尾,全串无空白
fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// 严格 YYYY-MM-DD（长度固定 10,拒绝非补零写法）
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// ISO 时间戳: RFC 3339 优先,其次无时区的 YYYY-MM-DDTHH:MM[:SS]（按 UTC 解释）
fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// locale_all 单元格: 逗号分隔 → 列表,空单元格回填 [locale_primary]
fn parse_locale_all(cell: Option<&str>, locale_primary: &str) -> Vec<String> {
    let parsed: Vec<String> = cell
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        vec![locale_primary.to_string()]
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_row(row_number: usize) -> RawWorkerRow {
        let mut fields = HashMap::new();
        fields.insert("hr_id".into(), "HR-1".into());
        fields.insert("full_name".into(), "John Doe".into());
        fields.insert("engagement_model".into(), "core".into());
        fields.insert("email_personal".into(), "john@example.com".into());
        fields.insert("country_residence".into(), "us".into());
        fields.insert("locale_primary".into(), "en".into());
        fields.insert("hire_date".into(), "2024-01-15".into());
        fields.insert("status".into(), "pending".into());
        RawWorkerRow::new(fields, row_number)
    }

    fn validator() -> WorkerRowValidator {
        WorkerRowValidator::new(&ImportProfile::workers())
    }

    fn set(row: &mut RawWorkerRow, column: &str, value: &str) {
        row.fields.insert(column.to_string(), value.to_string());
    }

    #[test]
    fn test_valid_pending_row_normalized() {
        let record = match validator().validate(&base_row(2)) {
            RowValidation::Valid(record) => record,
            RowValidation::Invalid(errors) => panic!("应当通过校验: {:?}", errors),
        };

        assert_eq!(record.hr_id, "HR-1");
        assert_eq!(record.country_residence, "US"); // 大写归一化
        assert_eq!(record.locale_all, vec!["en".to_string()]); // 回填主语言
        assert_eq!(record.status, WorkerStatus::Pending);
        assert!(record.rtw_datetime.is_none());
    }

    #[test]
    fn test_missing_required_fields_reported_per_field() {
        let mut row = base_row(2);
        set(&mut row, "hr_id", "");
        set(&mut row, "email_personal", "  ");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        assert!(errors
            .iter()
            .any(|e| e.field == "hr_id" && e.message == "hr_id is required"));
        assert!(errors
            .iter()
            .any(|e| e.field == "email_personal" && e.message == "email_personal is required"));
        assert!(errors.iter().all(|e| e.row == 2));
    }

    #[test]
    fn test_invalid_email_and_country() {
        let mut row = base_row(3);
        set(&mut row, "email_personal", "not-an-email");
        set(&mut row, "country_residence", "USA");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        assert!(errors
            .iter()
            .any(|e| e.field == "email_personal" && e.message == "Invalid email format"));
        assert!(errors.iter().any(|e| e.field == "country_residence"));
    }

    #[test]
    fn test_email_accepts_plus_alias() {
        assert!(is_valid_email("test+alias@example.co.uk"));
        assert!(is_valid_email("worker.name@company.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn test_strict_date_format() {
        assert!(parse_iso_date("2024-01-15").is_some());
        assert!(parse_iso_date("2024-1-15").is_none());
        assert!(parse_iso_date("15/01/2024").is_none());
        assert!(parse_iso_date("2024-13-01").is_none());
    }

    #[test]
    fn test_datetime_accepts_rfc3339_and_naive() {
        assert!(parse_iso_datetime("2024-06-15T09:00:00Z").is_some());
        assert!(parse_iso_datetime("2024-06-15T09:00").is_some());
        assert!(parse_iso_datetime("2024-06-15 09:00").is_none());
    }

    #[test]
    fn test_pending_with_rtw_rejected() {
        let mut row = base_row(4);
        set(&mut row, "rtw_datetime", "2024-01-01T09:00");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rtw_datetime");
        assert_eq!(errors[0].message, "Pending workers must not have rtw_datetime set");
    }

    #[test]
    fn test_active_without_rtw_rejected() {
        let mut row = base_row(5);
        set(&mut row, "status", "active");
        set(&mut row, "rtw_datetime", "");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        // termination_date 为空不应连带报错
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rtw_datetime");
        assert_eq!(errors[0].message, "active workers must have rtw_datetime set");
    }

    #[test]
    fn test_terminated_without_termination_date_rejected() {
        let mut row = base_row(6);
        set(&mut row, "status", "terminated");
        set(&mut row, "rtw_datetime", "2023-01-20T09:00:00Z");
        set(&mut row, "termination_date", "");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "termination_date");
        assert_eq!(
            errors[0].message,
            "Terminated workers must have termination_date set"
        );
    }

    #[test]
    fn test_malformed_rtw_not_double_reported() {
        let mut row = base_row(7);
        set(&mut row, "rtw_datetime", "not-a-datetime");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        // 格式错误已报,跨字段规则不再对同一字段追加
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.field == "rtw_datetime")
                .count(),
            1
        );
    }

    #[test]
    fn test_locale_all_parsed_from_comma_list() {
        let mut row = base_row(8);
        set(&mut row, "locale_all", "en, es ,fr");

        let record = match validator().validate(&row) {
            RowValidation::Valid(record) => record,
            RowValidation::Invalid(errors) => panic!("应当通过校验: {:?}", errors),
        };

        assert_eq!(record.locale_all, vec!["en", "es", "fr"]);
    }

    #[test]
    fn test_supervisor_id_must_be_uuid() {
        let mut row = base_row(9);
        set(&mut row, "supervisor_id", "not-a-uuid");

        let errors = match validator().validate(&row) {
            RowValidation::Invalid(errors) => errors,
            RowValidation::Valid(_) => panic!("应当校验失败"),
        };

        assert!(errors.iter().any(|e| e.field == "supervisor_id"));
    }
}
