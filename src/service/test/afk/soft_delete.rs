use super::*;

/// Tests soft-deleting everything while keeping the audit trail.
///
/// Expected: both windows disappear from active listings but stay in history
#[tokio::test]
async fn deletes_all_but_preserves_history() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    service
        .declare(declare_param(
            42,
            now - Duration::hours(1),
            now + Duration::hours(1),
        ))
        .await?;
    service
        .declare(declare_param(
            42,
            now + Duration::hours(2),
            now + Duration::hours(4),
        ))
        .await?;

    let affected = service.soft_delete(42, AfkDeleteSelector::All).await?;
    assert_eq!(affected, 2);

    assert!(service.active_now(&AfkFilter::default()).await?.is_empty());
    assert!(service.active_and_future_for_user(42).await?.is_empty());

    let history = service.history(42, 10).await?;
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|w| w.is_deleted));

    Ok(())
}

/// Tests restricting the delete to active windows.
///
/// Expected: the future window stays live
#[tokio::test]
async fn active_only_leaves_future_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    service
        .declare(declare_param(
            42,
            now - Duration::hours(1),
            now + Duration::hours(1),
        ))
        .await?;
    let future = service
        .declare(declare_param(
            42,
            now + Duration::hours(2),
            now + Duration::hours(4),
        ))
        .await?;

    let affected = service
        .soft_delete(42, AfkDeleteSelector::ActiveOnly)
        .await?;
    assert_eq!(affected, 1);

    let upcoming = service.active_and_future_for_user(42).await?;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, future.id);

    Ok(())
}

/// Tests soft-deleting a single window owned by someone else.
///
/// Expected: Err(WrongOwner)
#[tokio::test]
async fn single_window_checks_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    let window = service
        .declare(declare_param(
            42,
            now - Duration::hours(1),
            now + Duration::hours(1),
        ))
        .await?;

    let result = service
        .soft_delete(43, AfkDeleteSelector::Window(window.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::WrongOwner(_)))
    ));

    Ok(())
}
