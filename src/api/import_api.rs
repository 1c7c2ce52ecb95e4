// ==========================================
// 劳务管理控制台 - 批量导入 API
// ==========================================
// 职责: 封装批量导入向导,供 UI 层进程内调用
// 红线: 本层只做编排与错误转换,不含校验/导入规则
// ==========================================

use crate::api::error::ApiError;
use crate::config::ImportProfile;
use crate::domain::types::WizardStep;
use crate::domain::worker::{ImportSummary, ValidationOutcome};
use crate::importer::{
    render_import_report, render_validation_report, CsvParser, ImportWizard, TableParser,
};
use crate::repository::{SqliteWorkerStore, WorkerStore};
use std::sync::Arc;
use tracing::info;

// ==========================================
// ImportApi - 批量导入门面
// ==========================================
pub struct ImportApi {
    wizard: ImportWizard,
    parser: CsvParser,
}

impl ImportApi {
    /// 以注入的存储能力创建（测试时传入内存假实现）
    pub fn new(profile: ImportProfile, store: Arc<dyn WorkerStore>) -> Self {
        Self {
            wizard: ImportWizard::new(profile, store),
            parser: CsvParser::new(),
        }
    }

    /// 以 SQLite 数据库文件创建（生产路径）
    ///
    /// # 参数
    /// - profile: 导入配置
    /// - db_path: 数据库文件路径
    pub fn open_sqlite(profile: ImportProfile, db_path: &str) -> Result<Self, ApiError> {
        let store = SqliteWorkerStore::new(db_path)?;
        store.ensure_schema()?;
        Ok(Self::new(profile, Arc::new(store)))
    }

    // ===== 模板 =====

    /// 生成 CSV 模板文本（下载动作由 UI 层完成）
    pub fn template_csv(&self) -> Result<String, ApiError> {
        self.wizard
            .profile()
            .template_csv()
            .map_err(ApiError::Other)
    }

    // ===== 向导操作 =====

    /// 进入上传步骤
    pub fn begin_upload(&mut self) -> Result<(), ApiError> {
        self.wizard.advance_to_upload()?;
        Ok(())
    }

    /// 解析并校验上传的文件内容
    ///
    /// # 参数
    /// - file_name: 文件名（仅作载荷记录）
    /// - bytes: 文件原始字节
    ///
    /// # 返回
    /// - Ok(ValidationOutcome): 校验结果（含全部错误列表）
    pub async fn validate_file(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ValidationOutcome, ApiError> {
        info!(file_name, size = bytes.len(), "收到上传文件");
        self.wizard.select_file(file_name)?;
        let table = self.parser.parse(bytes)?;
        let outcome = self.wizard.run_validation(table).await?.clone();
        Ok(outcome)
    }

    /// 校验通过后进入预览步骤
    pub fn proceed_to_review(&mut self) -> Result<(), ApiError> {
        self.wizard.proceed_to_review()?;
        Ok(())
    }

    /// 显式确认后执行导入
    ///
    /// # 参数
    /// - on_progress: 分块进度回调（UI 进度条）
    pub async fn run_import<F>(&mut self, on_progress: F) -> Result<ImportSummary, ApiError>
    where
        F: FnMut(f64),
    {
        let summary = self.wizard.run_import(on_progress).await?.clone();
        Ok(summary)
    }

    /// 重置向导回 Template 步骤
    pub fn reset(&mut self) {
        self.wizard.reset();
    }

    // ===== 查询 =====

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn progress(&self) -> f64 {
        self.wizard.progress()
    }

    pub fn validation(&self) -> Option<&ValidationOutcome> {
        self.wizard.validation()
    }

    pub fn summary(&self) -> Option<&ImportSummary> {
        self.wizard.summary()
    }

    /// 导出当前错误集的 CSV 报表
    ///
    /// # 规则
    /// - Import 终态: 导入失败报表（row,message）
    /// - 其余: 校验错误报表（row,field,message）
    pub fn error_report_csv(&self) -> Result<String, ApiError> {
        if let Some(summary) = self.wizard.summary() {
            return Ok(render_import_report(&summary.errors)?);
        }
        let errors = self
            .wizard
            .validation()
            .map(|v| v.errors.as_slice())
            .unwrap_or(&[]);
        Ok(render_validation_report(errors)?)
    }
}
