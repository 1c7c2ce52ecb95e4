// ==========================================
// 劳务管理控制台 - 导入配置
// ==========================================
// 职责: 定义一次批量导入的列契约、分块大小、行数上限与模板数据
// 红线: 管道逻辑只读本配置,不得硬编码列名/阈值
// ==========================================
// 注: 历史上人员弹窗与统计页各带一套列契约和分块参数,
//     现统一为单管道 + 配置项,差异全部收敛到 ImportProfile
// ==========================================

use anyhow::Context;

/// 默认分块大小（每次 insert_many 的记录数）
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// 单文件行数上限（超出整体拒绝,不截断）
pub const DEFAULT_MAX_ROWS: usize = 500;

// ==========================================
// ImportProfile - 导入配置
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportProfile {
    /// 目标实体名（日志与错误消息用）
    pub entity: &'static str,
    /// 必填列（缺失即表头错误）
    pub required_columns: Vec<&'static str>,
    /// 可选列（允许出现,缺失不报错）
    pub optional_columns: Vec<&'static str>,
    /// 分块大小
    pub chunk_size: usize,
    /// 行数上限
    pub max_rows: usize,
    /// 模板示例行（与 all_columns 等宽）
    template_examples: Vec<Vec<&'static str>>,
}

impl ImportProfile {
    /// 人员批量导入的标准配置
    ///
    /// # 模板示例行
    /// 覆盖三种状态组合:
    /// - pending: rtw_datetime / termination_date 均为空
    /// - active: rtw_datetime 必填,可带多语言与背调日期
    /// - terminated: rtw_datetime 与 termination_date 均必填
    pub fn workers() -> Self {
        Self {
            entity: "workers",
            required_columns: vec![
                "hr_id",
                "full_name",
                "engagement_model",
                "email_personal",
                "country_residence",
                "locale_primary",
                "hire_date",
                "status",
            ],
            optional_columns: vec![
                "locale_all",
                "email_pph",
                "worker_role",
                "supervisor_id",
                "rtw_datetime",
                "termination_date",
                "bgc_expiration_date",
            ],
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
            template_examples: vec![
                vec![
                    "HR-EX-001",
                    "John Doe",
                    "core",
                    "worker1@example.com",
                    "US",
                    "en",
                    "2025-01-15",
                    "pending",
                    "",
                    "john.doe@pph.com",
                    "Annotator",
                    "",
                    "",
                    "",
                    "",
                ],
                vec![
                    "HR-EX-002",
                    "Jane Smith",
                    "upwork",
                    "worker2@example.com",
                    "CA",
                    "en",
                    "2024-06-01",
                    "active",
                    "en,es,fr",
                    "",
                    "Senior Annotator",
                    "",
                    "2024-06-15T09:00:00Z",
                    "",
                    "2025-06-15",
                ],
                vec![
                    "HR-EX-003",
                    "Bob Wilson",
                    "core",
                    "worker3@example.com",
                    "US",
                    "en",
                    "2023-01-10",
                    "terminated",
                    "en",
                    "",
                    "Annotator",
                    "",
                    "2023-01-20T09:00:00Z",
                    "2024-12-01",
                    "",
                ],
            ],
        }
    }

    /// 全部已知列（必填在前,保持模板列序）
    pub fn all_columns(&self) -> Vec<&'static str> {
        let mut columns = self.required_columns.clone();
        columns.extend(self.optional_columns.iter().copied());
        columns
    }

    /// 列名是否在契约内
    pub fn is_known_column(&self, name: &str) -> bool {
        self.required_columns.iter().any(|c| *c == name)
            || self.optional_columns.iter().any(|c| *c == name)
    }

    /// 生成 CSV 模板（表头 + 示例行）
    pub fn template_csv(&self) -> anyhow::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.all_columns())
            .context("写入模板表头失败")?;
        for example in &self.template_examples {
            writer.write_record(example).context("写入模板示例行失败")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("模板缓冲区回收失败: {}", e))?;
        String::from_utf8(bytes).context("模板编码失败")
    }
}
