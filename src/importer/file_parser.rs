// ==========================================
// 劳务管理控制台 - 表格文件解析器
// ==========================================
// 职责: 原始字节 → 表头列表 + 行记录 + 行级解析错误
// 红线: 只做语法解析,不做任何业务校验
// ==========================================
// 注: 以 `#` 开头的注释行跳过,行号以源文件为准（表头为第 1 行）
// ==========================================

use crate::domain::worker::{RawWorkerRow, ValidationError};
use crate::importer::error::ImportError;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// ParsedTable - 解析产物
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// 表头列名（保留源文件列序,已去除首尾空白）
    pub header_columns: Vec<String>,
    /// 数据行（列名 → 原始文本 + 源行号）
    pub rows: Vec<RawWorkerRow>,
    /// 行级解析错误（字段数不符、引号未闭合等）
    pub parse_errors: Vec<ValidationError>,
}

// ==========================================
// TableParser Trait
// ==========================================
// 用途: 表格解析协作方接口,向导只依赖本接口
// 实现者: CsvParser
pub trait TableParser: Send + Sync {
    /// 解析原始字节为表格
    ///
    /// # 返回
    /// - Ok(ParsedTable): 解析结果（行级问题进 parse_errors,不中断）
    /// - Err(ImportError): 整个文件不可解析（编码损坏等）
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTable, ImportError>;
}

// ==========================================
// CsvParser - CSV 解析器
// ==========================================
pub struct CsvParser {
    /// 注释行前缀（默认 '#'）
    comment: Option<u8>,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { comment: Some(b'#') }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTable, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(self.comment)
            .from_reader(bytes);

        // 表头不可读视为整个文件不可解析
        let header_columns: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::CsvParseError(format!("表头解析失败: {}", e)))?
            .iter()
            .map(|c| c.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut parse_errors = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            // 注释行已被跳过,行号优先取解析器报告的源行号
            let fallback_row = idx + 2;
            match result {
                Ok(record) => {
                    let row_number = record
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(fallback_row);
                    let fields: HashMap<String, String> = header_columns
                        .iter()
                        .zip(record.iter())
                        .map(|(col, val)| (col.clone(), val.to_string()))
                        .collect();
                    rows.push(RawWorkerRow::new(fields, row_number));
                }
                Err(err) => {
                    let row_number = err
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(fallback_row);
                    parse_errors.push(ValidationError::new(
                        row_number,
                        "file",
                        format!("Failed to parse CSV row: {}", err),
                    ));
                }
            }
        }

        debug!(
            columns = header_columns.len(),
            rows = rows.len(),
            parse_errors = parse_errors.len(),
            "CSV 解析完成"
        );

        Ok(ParsedTable {
            header_columns,
            rows,
            parse_errors,
        })
    }
}
