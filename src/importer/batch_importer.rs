// ==========================================
// 劳务管理控制台 - 分块批量导入器
// ==========================================
// 职责: 干净记录分块落库 + 汇总统计 + 进度上报
// 红线: 分块严格串行,禁止并发（保证进度单调与错误归属清晰）
// 红线: 单块失败不中断后续分块（fail-open）
// 红线: 整块失败只记一条 row=0 错误,不伪造行级归属
// ==========================================

use crate::domain::worker::{ImportSummary, ValidationError, WorkerRecord};
use crate::repository::worker_store::WorkerStore;
use tracing::{info, warn};

// ==========================================
// BatchImporter - 批量导入器
// ==========================================
pub struct BatchImporter {
    chunk_size: usize,
}

impl BatchImporter {
    /// # 参数
    /// - chunk_size: 单次 insert_many 的记录数（至少为 1）
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// 串行分块导入全部记录
    ///
    /// # 参数
    /// - records: 干净记录列表（已通过校验与查重）
    /// - store: 持久化能力
    /// - on_progress: 每处理完一个分块回调一次,入参为 [0,1] 进度分数
    ///
    /// # 返回
    /// - ImportSummary: total 恒等于 records.len(),
    ///   success/failed/errors 按各分块结果累加
    ///
    /// # 失败语义
    /// - 分块正常返回: 按其 success/failed/errors 累加
    /// - 分块整体失败(Err): 该块全部记录计为 failed,
    ///   追加一条携带底层错误消息的 row=0 错误,继续下一块
    pub async fn run<F>(
        &self,
        records: &[WorkerRecord],
        store: &dyn WorkerStore,
        mut on_progress: F,
    ) -> ImportSummary
    where
        F: FnMut(f64),
    {
        let total = records.len();
        let mut summary = ImportSummary {
            total,
            ..ImportSummary::default()
        };

        let mut attempted = 0usize;
        for (chunk_index, chunk) in records.chunks(self.chunk_size).enumerate() {
            match store.insert_many(chunk).await {
                Ok(outcome) => {
                    info!(
                        chunk_index,
                        chunk_rows = chunk.len(),
                        success = outcome.success,
                        failed = outcome.failed,
                        "分块落库完成"
                    );
                    summary.success += outcome.success;
                    summary.failed += outcome.failed;
                    summary.errors.extend(outcome.errors);
                }
                Err(err) => {
                    // 整块失败时行级成败不可知,只记录块级错误
                    warn!(chunk_index, chunk_rows = chunk.len(), error = %err, "分块落库失败");
                    summary.failed += chunk.len();
                    summary
                        .errors
                        .push(ValidationError::new(0, "", err.to_string()));
                }
            }

            attempted += chunk.len();
            on_progress(attempted as f64 / total as f64);
        }

        info!(
            total = summary.total,
            success = summary.success,
            failed = summary.failed,
            "批量导入完成"
        );

        summary
    }
}
