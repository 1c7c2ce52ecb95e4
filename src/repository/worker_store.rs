// ==========================================
// 劳务管理控制台 - 人员存储 Trait
// ==========================================
// 职责: 定义导入管道依赖的存储能力（不包含业务逻辑）
// 红线: 管道只通过本接口访问存量数据,便于测试替换为内存假实现
// ==========================================

use crate::domain::worker::{ChunkOutcome, ExistingWorkerKeys, WorkerRecord};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// WorkerStore Trait
// ==========================================
// 用途: 查重只读 + 分块写入
// 实现者: SqliteWorkerStore（生产）、MemoryWorkerStore（测试）
#[async_trait]
pub trait WorkerStore: Send + Sync {
    /// 批量查询已存在的查重键
    ///
    /// # 参数
    /// - hr_ids: 候选 HR 编号并集（调用方已统一小写）
    /// - emails: 候选邮箱并集（个人 + PPH,调用方已统一小写）
    ///
    /// # 返回
    /// - Ok(Vec<ExistingWorkerKeys>): 任一键命中的存量行（大小写不敏感匹配）
    /// - Err: 查询 I/O 故障（调用方降级处理,不得崩溃）
    ///
    /// # 红线
    /// 每次校验只调用一次,实现方不得退化为逐行查询
    async fn lookup_existing(
        &self,
        hr_ids: &[String],
        emails: &[String],
    ) -> RepositoryResult<Vec<ExistingWorkerKeys>>;

    /// 写入一个分块的记录
    ///
    /// # 参数
    /// - records: 单分块记录（调用方负责分块与串行）
    ///
    /// # 返回
    /// - Ok(ChunkOutcome): 本分块的 success/failed/errors
    /// - Err: 分块整体失败（调用方按全部失败累计,继续后续分块）
    async fn insert_many(&self, records: &[WorkerRecord]) -> RepositoryResult<ChunkOutcome>;
}
