// ==========================================
// 劳务管理控制台 - 批量导入向导
// ==========================================
// 职责: 五步状态机,编排校验与导入各阶段,持有可观察进度
// 红线: 不允许跳步;Import 为终态,仅 reset 可退出
// 红线: 状态与载荷整体替换,不做跨步骤的部分原地修改
// ==========================================
// 流程: Template → Upload → Validate → Review → Import
//   - Upload → Validate: 需已选择文件;依次执行行数上限检查、
//     表头结构校验、逐行字段校验、整批查重
//   - Validate → Review: 需 valid 非空且 errors 为空（部分错误不得放行）
//   - Review → Import: 显式确认后分块落库
//   - 任意状态 → Template: 全量重置
// ==========================================

use crate::config::ImportProfile;
use crate::domain::types::WizardStep;
use crate::domain::worker::{ImportSummary, ValidationError, ValidationOutcome, WorkerRecord};
use crate::importer::batch_importer::BatchImporter;
use crate::importer::duplicate_detector::DuplicateDetector;
use crate::importer::error::ImportError;
use crate::importer::field_validator::{RowValidation, RowValidator, WorkerRowValidator};
use crate::importer::file_parser::ParsedTable;
use crate::importer::structural_validator::validate_header;
use crate::repository::worker_store::WorkerStore;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ImportWizard - 导入向导控制器
// ==========================================
pub struct ImportWizard {
    profile: ImportProfile,
    store: Arc<dyn WorkerStore>,
    validator: Arc<dyn RowValidator>,

    // ===== 状态与载荷（reset 时整体清空）=====
    step: WizardStep,
    selected_file: Option<String>,
    validation: Option<ValidationOutcome>,
    summary: Option<ImportSummary>,
    progress: f64,
}

impl ImportWizard {
    /// 创建向导（初始停在 Template 步骤）
    pub fn new(profile: ImportProfile, store: Arc<dyn WorkerStore>) -> Self {
        let validator = Arc::new(WorkerRowValidator::new(&profile));
        Self {
            profile,
            store,
            validator,
            step: WizardStep::Template,
            selected_file: None,
            validation: None,
            summary: None,
            progress: 0.0,
        }
    }

    /// 替换行校验规则集（按实体定制时使用）
    pub fn with_validator(mut self, validator: Arc<dyn RowValidator>) -> Self {
        self.validator = validator;
        self
    }

    // ===== 只读访问 =====

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn validation(&self) -> Option<&ValidationOutcome> {
        self.validation.as_ref()
    }

    pub fn summary(&self) -> Option<&ImportSummary> {
        self.summary.as_ref()
    }

    /// 导入进度分数 [0,1]（单调递增,reset 归零）
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn profile(&self) -> &ImportProfile {
        &self.profile
    }

    // ===== 状态跳转 =====

    /// Template → Upload（无条件,模板步骤仅提供信息）
    pub fn advance_to_upload(&mut self) -> Result<(), ImportError> {
        self.require_step(WizardStep::Template, WizardStep::Upload)?;
        self.step = WizardStep::Upload;
        info!(step = %self.step, "向导进入上传步骤");
        Ok(())
    }

    /// 在 Upload 步骤记录所选文件（可重复选择覆盖）
    pub fn select_file(&mut self, file_name: impl Into<String>) -> Result<(), ImportError> {
        if self.step != WizardStep::Upload {
            return Err(ImportError::InvalidTransition {
                from: self.step.to_string(),
                to: WizardStep::Upload.to_string(),
            });
        }
        self.selected_file = Some(file_name.into());
        Ok(())
    }

    /// Upload → Validate: 对解析产物执行完整校验管道
    ///
    /// # 前置条件
    /// - 当前在 Upload 步骤且已选择文件
    ///
    /// # 校验顺序
    /// 1. 空文件 → 单条 row=0 错误
    /// 2. 行数超上限 → 单条 row=0 错误,整体拒绝不截断
    /// 3. 表头结构错误 → 短路,不再做行级校验
    /// 4. 解析器行级错误 + 逐行字段校验 + 整批查重
    pub async fn run_validation(
        &mut self,
        table: ParsedTable,
    ) -> Result<&ValidationOutcome, ImportError> {
        self.require_step(WizardStep::Upload, WizardStep::Validate)?;
        if self.selected_file.is_none() {
            return Err(ImportError::TransitionGuardFailed(
                "上传步骤未选择文件".to_string(),
            ));
        }

        let outcome = self.validate_table(table).await;
        info!(
            valid = outcome.valid.len(),
            errors = outcome.errors.len(),
            "校验完成"
        );

        self.step = WizardStep::Validate;
        let outcome_ref = self.validation.insert(outcome);
        Ok(outcome_ref)
    }

    /// Validate → Review
    ///
    /// # 前置条件
    /// - valid 非空且 errors 为空;部分错误批次不得放行,
    ///   用户需修正后重新上传
    ///
    /// # 失败语义
    /// 前置条件不满足时返回 Err 且状态不变
    pub fn proceed_to_review(&mut self) -> Result<(), ImportError> {
        self.require_step(WizardStep::Validate, WizardStep::Review)?;

        let outcome = self.validation.as_ref().ok_or_else(|| {
            ImportError::TransitionGuardFailed("校验结果缺失".to_string())
        })?;
        if !outcome.errors.is_empty() {
            warn!(errors = outcome.errors.len(), "校验错误未清零,拒绝进入预览");
            return Err(ImportError::TransitionGuardFailed(format!(
                "存在 {} 条校验错误,修正后重新上传",
                outcome.errors.len()
            )));
        }
        if outcome.valid.is_empty() {
            return Err(ImportError::TransitionGuardFailed(
                "没有可导入的有效记录".to_string(),
            ));
        }

        self.step = WizardStep::Review;
        info!(rows = outcome.valid.len(), "向导进入预览步骤");
        Ok(())
    }

    /// Review → Import: 显式确认后分块落库
    ///
    /// # 参数
    /// - on_progress: 每个分块完成后回调一次当前进度分数
    ///
    /// # 说明
    /// 导入一经触发不可取消,全部分块处理完毕后才返回;
    /// 进入 Import 终态后汇总不再变化,直到 reset
    pub async fn run_import<F>(&mut self, mut on_progress: F) -> Result<&ImportSummary, ImportError>
    where
        F: FnMut(f64),
    {
        self.require_step(WizardStep::Review, WizardStep::Import)?;

        let records: Vec<WorkerRecord> = self
            .validation
            .as_ref()
            .map(|v| v.valid.clone())
            .unwrap_or_default();

        let importer = BatchImporter::new(self.profile.chunk_size);
        let store = Arc::clone(&self.store);
        let mut progress = 0.0f64;
        let summary = importer
            .run(&records, store.as_ref(), |fraction| {
                progress = fraction;
                on_progress(fraction);
            })
            .await;

        self.progress = progress;
        self.step = WizardStep::Import;
        let summary_ref = self.summary.insert(summary);
        Ok(summary_ref)
    }

    /// 任意状态 → Template: 全量重置（清空文件、校验结果、汇总与进度）
    pub fn reset(&mut self) {
        info!(from = %self.step, "向导重置");
        self.step = WizardStep::Template;
        self.selected_file = None;
        self.validation = None;
        self.summary = None;
        self.progress = 0.0;
    }

    // ===== 内部实现 =====

    fn require_step(&self, expected: WizardStep, target: WizardStep) -> Result<(), ImportError> {
        if self.step != expected {
            return Err(ImportError::InvalidTransition {
                from: self.step.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    async fn validate_table(&self, table: ParsedTable) -> ValidationOutcome {
        // === 1. 空文件 ===
        if table.rows.is_empty() && table.parse_errors.is_empty() {
            return ValidationOutcome {
                valid: Vec::new(),
                errors: vec![ValidationError::file_level("file", "CSV file is empty")],
            };
        }

        // === 2. 行数上限（整体拒绝,不截断）===
        if table.rows.len() > self.profile.max_rows {
            return ValidationOutcome {
                valid: Vec::new(),
                errors: vec![ValidationError::file_level(
                    "file",
                    format!(
                        "Row count {} exceeds the maximum of {} rows per upload",
                        table.rows.len(),
                        self.profile.max_rows
                    ),
                )],
            };
        }

        // === 3. 表头结构（错误时短路,行级校验无意义）===
        let structural_errors = validate_header(&table.header_columns, &self.profile);
        if !structural_errors.is_empty() {
            let mut errors = structural_errors;
            errors.extend(table.parse_errors);
            return ValidationOutcome {
                valid: Vec::new(),
                errors,
            };
        }

        // === 4. 行级字段校验 ===
        let mut errors = table.parse_errors;
        let mut candidates: Vec<(usize, WorkerRecord)> = Vec::new();
        for row in &table.rows {
            match self.validator.validate(row) {
                RowValidation::Valid(record) => candidates.push((row.row_number, record)),
                RowValidation::Invalid(row_errors) => errors.extend(row_errors),
            }
        }

        // === 5. 整批查重（存量查询仅此一次）===
        let detector = DuplicateDetector::new();
        let (duplicate_errors, clean) = detector.detect(&candidates, self.store.as_ref()).await;
        errors.extend(duplicate_errors);

        ValidationOutcome {
            valid: clean,
            errors,
        }
    }
}
