// ==========================================
// 劳务管理控制台 - 重复检测器
// ==========================================
// 职责: 批次内查重 + 存量数据查重
// 红线: 存量查询整批一次,禁止逐行查询
// 红线: 查询失败降级为单条 row=0 错误,不得丢弃已有字段级结果
// ==========================================

use crate::domain::worker::{ValidationError, WorkerRecord};
use crate::repository::worker_store::WorkerStore;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

// ==========================================
// DuplicateDetector - 重复检测器
// ==========================================
// 唯一性口径: hr_id 与两个邮箱字段,大小写不敏感;
// 两个邮箱字段共用同一命名空间（个人邮箱与 PPH 邮箱互斥）
pub struct DuplicateDetector;

impl DuplicateDetector {
    pub fn new() -> Self {
        Self
    }

    /// 对通过行级校验的记录做两轮查重
    ///
    /// # 参数
    /// - rows: (源行号, 记录) 列表,保持行序
    /// - store: 存量数据只读能力
    ///
    /// # 返回
    /// - (errors, clean): 全部重复错误 + 两轮均未命中的干净记录
    ///
    /// # 两轮检测
    /// 1. 批次内: 按行序维护已见集合,第二次及之后出现的值被标记,
    ///    错误消息引用首次出现的行号;首次出现本轮绝不被标记
    /// 2. 存量: 以全部候选 hr_id/邮箱的并集做一次批量查询,命中即标记
    ///
    /// # 降级
    /// 存量查询 I/O 失败时仅追加一条 row=0 错误并以批次内结果继续,
    /// 校验阶段不崩溃
    pub async fn detect(
        &self,
        rows: &[(usize, WorkerRecord)],
        store: &dyn WorkerStore,
    ) -> (Vec<ValidationError>, Vec<WorkerRecord>) {
        let mut errors = Vec::new();
        let mut flagged: HashSet<usize> = HashSet::new();

        // === 第 1 轮: 批次内查重 ===
        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        let mut seen_emails: HashMap<String, usize> = HashMap::new();

        for (row_number, record) in rows {
            let id_key = record.hr_id.to_lowercase();
            if let Some(first_row) = seen_ids.get(&id_key) {
                errors.push(ValidationError::new(
                    *row_number,
                    "hr_id",
                    format!("Duplicate hr_id: already used at row {}", first_row),
                ));
                flagged.insert(*row_number);
            } else {
                seen_ids.insert(id_key, *row_number);
            }

            let mut check_email = |field: &str, value: &str| {
                let email_key = value.to_lowercase();
                if let Some(first_row) = seen_emails.get(&email_key) {
                    errors.push(ValidationError::new(
                        *row_number,
                        field,
                        format!("Duplicate email: already used at row {}", first_row),
                    ));
                    flagged.insert(*row_number);
                } else {
                    seen_emails.insert(email_key, *row_number);
                }
            };

            check_email("email_personal", &record.email_personal);
            if let Some(pph) = &record.email_pph {
                check_email("email_pph", pph);
            }
        }

        // === 第 2 轮: 存量查重（整批一次查询） ===
        let candidate_ids: Vec<String> = seen_ids.keys().cloned().collect();
        let candidate_emails: Vec<String> = seen_emails.keys().cloned().collect();

        match store.lookup_existing(&candidate_ids, &candidate_emails).await {
            Ok(existing) => {
                let existing_ids: HashSet<String> =
                    existing.iter().map(|w| w.hr_id.to_lowercase()).collect();
                let existing_emails: HashSet<String> = existing
                    .iter()
                    .flat_map(|w| {
                        std::iter::once(&w.email_personal)
                            .chain(w.email_pph.iter())
                            .map(|e| e.to_lowercase())
                            .collect::<Vec<_>>()
                    })
                    .collect();

                for (row_number, record) in rows {
                    if existing_ids.contains(&record.hr_id.to_lowercase()) {
                        errors.push(ValidationError::new(
                            *row_number,
                            "hr_id",
                            format!("HR ID already exists: {}", record.hr_id),
                        ));
                        flagged.insert(*row_number);
                    }
                    if existing_emails.contains(&record.email_personal.to_lowercase()) {
                        errors.push(ValidationError::new(
                            *row_number,
                            "email_personal",
                            "Email already exists",
                        ));
                        flagged.insert(*row_number);
                    }
                    if let Some(pph) = &record.email_pph {
                        if existing_emails.contains(&pph.to_lowercase()) {
                            errors.push(ValidationError::new(
                                *row_number,
                                "email_pph",
                                "Email already exists",
                            ));
                            flagged.insert(*row_number);
                        }
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "存量查重查询失败,降级为批次内查重");
                errors.push(ValidationError::file_level(
                    "store",
                    format!("Duplicate check against existing workers failed: {}", err),
                ));
            }
        }

        let clean: Vec<WorkerRecord> = rows
            .iter()
            .filter(|(row_number, _)| !flagged.contains(row_number))
            .map(|(_, record)| record.clone())
            .collect();

        debug!(
            input_rows = rows.len(),
            flagged = flagged.len(),
            clean = clean.len(),
            errors = errors.len(),
            "查重完成"
        );

        (errors, clean)
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}
