// ==========================================
// 劳务管理控制台 - SQLite 存储集成测试
// ==========================================
// 覆盖: 建表、分块写入事务、批量查重查询、唯一约束
// ==========================================


use test_helpers::{create_test_store, pending_worker};
use workforce_console::repository::{RepositoryError, WorkerStore};

#[tokio::test]
async fn test_insert_then_lookup_roundtrip() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");

    let records = vec![
        pending_worker("HR-1", "a@example.com"),
        pending_worker("HR-2", "b@example.com"),
    ];
    let outcome = store.insert_many(&records).await.expect("写入失败");
    assert_eq!(outcome.success, 2);
    assert_eq!(outcome.failed, 0);

    // 大小写不敏感命中
    let hits = store
        .lookup_existing(&["hr-1".to_string()], &["b@example.com".to_string()])
        .await
        .expect("查询失败");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().any(|w| w.hr_id == "HR-1"));
    assert!(hits.iter().any(|w| w.email_personal == "b@example.com"));

    println!("✅ 写入/查重往返测试通过");
}

#[tokio::test]
async fn test_lookup_with_empty_keys_returns_empty() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");
    let hits = store.lookup_existing(&[], &[]).await.expect("查询失败");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_lookup_matches_pph_email() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");

    let mut record = pending_worker("HR-1", "personal@example.com");
    record.email_pph = Some("Work@PPH.com".to_string());
    store.insert_many(&[record]).await.expect("写入失败");

    let hits = store
        .lookup_existing(&[], &["work@pph.com".to_string()])
        .await
        .expect("查询失败");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email_pph.as_deref(), Some("Work@PPH.com"));
}

#[tokio::test]
async fn test_duplicate_chunk_rolls_back_whole_transaction() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");

    store
        .insert_many(&[pending_worker("HR-1", "a@example.com")])
        .await
        .expect("写入失败");

    // 分块内第二行与存量 hr_id 冲突（仅大小写不同）→ 整块回滚
    let chunk = vec![
        pending_worker("HR-9", "fresh@example.com"),
        pending_worker("hr-1", "dup@example.com"),
    ];
    let result = store.insert_many(&chunk).await;
    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));

    // 整块回滚后,块内第一行也不应落库
    let hits = store
        .lookup_existing(&["hr-9".to_string()], &[])
        .await
        .expect("查询失败");
    assert!(hits.is_empty(), "失败分块的记录不应部分落库");

    println!("✅ 分块事务回滚测试通过");
}

#[tokio::test]
async fn test_case_insensitive_email_unique_constraint() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");

    store
        .insert_many(&[pending_worker("HR-1", "same@example.com")])
        .await
        .expect("写入失败");

    let result = store
        .insert_many(&[pending_worker("HR-2", "SAME@EXAMPLE.COM")])
        .await;
    assert!(
        matches!(result, Err(RepositoryError::UniqueConstraintViolation(_))),
        "邮箱唯一约束应大小写不敏感"
    );
}

#[tokio::test]
async fn test_empty_chunk_is_noop() {
    let (_temp_file, store) = create_test_store().expect("创建测试数据库失败");
    let outcome = store.insert_many(&[]).await.expect("写入失败");
    assert_eq!(outcome.success, 0);
    assert_eq!(outcome.failed, 0);
}
