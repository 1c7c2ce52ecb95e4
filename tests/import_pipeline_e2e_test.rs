// ==========================================
// 劳务管理控制台 - 批量导入全流程测试
// ==========================================
// 覆盖: 模板 → 上传 → 校验 → 预览 → 导入的完整链路
// ==========================================


use std::sync::Arc;
use test_helpers::MemoryWorkerStore;
use workforce_console::importer::{CsvParser, ImportWizard, TableParser};
use workforce_console::{EngagementModel, ImportProfile, WizardStep, WorkerStatus};

fn mixed_status_csv() -> String {
    let mut csv = format!("{}\n", test_helpers::workers_csv_header());
    // pending: 日期字段全空
    csv.push_str(
        "HR-001,John Doe,core,john@example.com,US,en,2025-01-15,pending,,john.doe@pph.com,Annotator,,,,\n",
    );
    // active: 多语言 + rtw + 背调日期
    csv.push_str(
        "HR-002,Jane Smith,upwork,jane@example.com,CA,en,2024-06-01,active,\"en,es,fr\",,Senior Annotator,,2024-06-15T09:00:00Z,,2025-06-15\n",
    );
    // terminated: rtw 与离职日期均必填
    csv.push_str(
        "HR-003,Bob Wilson,core,bob@example.com,US,en,2023-01-10,terminated,en,,Annotator,,2023-01-20T09:00:00Z,2024-12-01,\n",
    );
    csv
}

#[tokio::test]
async fn test_full_pipeline_happy_path() {
    // === 准备 ===
    let store = Arc::new(MemoryWorkerStore::new());
    let mut wizard = ImportWizard::new(ImportProfile::workers(), store.clone());

    // === Template → Upload ===
    wizard.advance_to_upload().expect("进入上传步骤失败");
    wizard.select_file("workers_bulk_upload.csv").expect("选择文件失败");
    assert_eq!(wizard.selected_file(), Some("workers_bulk_upload.csv"));

    // === Upload → Validate ===
    let table = CsvParser::new()
        .parse(mixed_status_csv().as_bytes())
        .expect("解析失败");
    let outcome = wizard.run_validation(table).await.expect("校验失败").clone();
    assert_eq!(wizard.step(), WizardStep::Validate);
    assert!(outcome.errors.is_empty(), "不应有错误: {:?}", outcome.errors);
    assert_eq!(outcome.valid.len(), 3);

    // 归一化检查
    let jane = &outcome.valid[1];
    assert_eq!(jane.hr_id, "HR-002");
    assert_eq!(jane.engagement_model, EngagementModel::Upwork);
    assert_eq!(jane.status, WorkerStatus::Active);
    assert_eq!(jane.locale_all, vec!["en", "es", "fr"]);
    assert!(jane.rtw_datetime.is_some());
    assert!(jane.bgc_expiration_date.is_some());

    // pending 行的空可选列归一化为 None
    let john = &outcome.valid[0];
    assert_eq!(john.email_pph.as_deref(), Some("john.doe@pph.com"));
    assert!(john.rtw_datetime.is_none());
    assert!(john.termination_date.is_none());

    // === Validate → Review → Import ===
    wizard.proceed_to_review().expect("进入预览失败");
    assert_eq!(wizard.step(), WizardStep::Review);

    let mut progress_points = Vec::new();
    let summary = wizard
        .run_import(|p| progress_points.push(p))
        .await
        .expect("导入失败")
        .clone();

    assert_eq!(wizard.step(), WizardStep::Import);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.success, 3);
    assert_eq!(summary.failed, 0);
    assert!(summary.errors.is_empty());
    assert_eq!(wizard.progress(), 1.0);
    assert_eq!(progress_points.last().copied(), Some(1.0));

    // 落库内容与校验产物一致
    let inserted = store.inserted_records();
    assert_eq!(inserted.len(), 3);
    assert_eq!(inserted[2].status, WorkerStatus::Terminated);
    assert!(inserted[2].termination_date.is_some());

    println!("✅ 全流程导入测试通过");
}

#[tokio::test]
async fn test_invalid_rows_excluded_from_valid_set() {
    let store = Arc::new(MemoryWorkerStore::new());
    let mut wizard = ImportWizard::new(ImportProfile::workers(), store.clone());
    wizard.advance_to_upload().expect("进入上传步骤失败");
    wizard.select_file("mixed.csv").expect("选择文件失败");

    let mut csv = format!("{}\n", test_helpers::workers_csv_header());
    // 第 2 行: pending 却带 rtw → 跨字段错误
    csv.push_str(
        "HR-001,John Doe,core,john@example.com,US,en,2025-01-15,pending,,,,,2024-01-01T09:00,,\n",
    );
    // 第 3 行: 合法
    csv.push_str(&test_helpers::pending_csv_row("HR-002", "ok@example.com"));
    csv.push('\n');
    // 第 4 行: active 缺 rtw
    csv.push_str("HR-003,Amy Lee,core,amy@example.com,US,en,2024-03-01,active,,,,,,,\n");

    let table = CsvParser::new().parse(csv.as_bytes()).expect("解析失败");
    let outcome = wizard.run_validation(table).await.expect("校验失败").clone();

    // 排除不变量: 有错误的行绝不出现在 valid 中
    assert_eq!(outcome.valid.len(), 1);
    assert_eq!(outcome.valid[0].hr_id, "HR-002");

    assert!(outcome
        .errors
        .iter()
        .any(|e| e.row == 2
            && e.field == "rtw_datetime"
            && e.message == "Pending workers must not have rtw_datetime set"));
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.row == 4
            && e.field == "rtw_datetime"
            && e.message == "active workers must have rtw_datetime set"));

    println!("✅ 排除不变量测试通过");
}

#[tokio::test]
async fn test_template_passes_own_validation() {
    // 模板自洽: 用管道自身校验模板内容应零错误
    let store = Arc::new(MemoryWorkerStore::new());
    let profile = ImportProfile::workers();
    let template = profile.template_csv().expect("模板生成失败");

    let mut wizard = ImportWizard::new(profile, store);
    wizard.advance_to_upload().expect("进入上传步骤失败");
    wizard.select_file("template.csv").expect("选择文件失败");

    let table = CsvParser::new().parse(template.as_bytes()).expect("解析失败");
    let outcome = wizard.run_validation(table).await.expect("校验失败").clone();

    assert!(outcome.errors.is_empty(), "模板应通过校验: {:?}", outcome.errors);
    assert_eq!(outcome.valid.len(), 3);

    println!("✅ 模板自洽测试通过");
}

#[tokio::test]
async fn test_duplicate_rows_block_progression() {
    let store = Arc::new(MemoryWorkerStore::new());
    let mut wizard = ImportWizard::new(ImportProfile::workers(), store);
    wizard.advance_to_upload().expect("进入上传步骤失败");
    wizard.select_file("dup.csv").expect("选择文件失败");

    let mut csv = format!("{}\n", test_helpers::workers_csv_header());
    csv.push_str(&test_helpers::pending_csv_row("HR-1", "a@example.com"));
    csv.push('\n');
    // 同 hr_id 仅大小写不同
    csv.push_str(&test_helpers::pending_csv_row("hr-1", "b@example.com"));
    csv.push('\n');

    let table = CsvParser::new().parse(csv.as_bytes()).expect("解析失败");
    let outcome = wizard.run_validation(table).await.expect("校验失败").clone();

    assert_eq!(outcome.valid.len(), 1);
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.row == 3 && e.field == "hr_id" && e.message.contains("row 2")));

    // 有重复错误时不得进入预览
    assert!(wizard.proceed_to_review().is_err());
}
