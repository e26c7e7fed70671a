use super::*;

/// Tests returning early without naming a window.
///
/// All of the user's live windows are ended and leave the active listing.
///
/// Expected: Ok(2) with both windows stamped
#[tokio::test]
async fn ends_all_live_windows_without_id() -> Result<(), AppError> {
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

    let affected = service.return_early(42, None).await?;
    assert_eq!(affected, 2);

    let listed = service.active_now(&AfkFilter::default()).await?;
    assert!(listed.is_empty());

    Ok(())
}

/// Tests returning early with nothing to end.
///
/// Expected: Ok(0), not an error
#[tokio::test]
async fn count_zero_when_nothing_to_end() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AfkService::new(db, KeyedLocks::new());
    let affected = service.return_early(42, None).await?;

    assert_eq!(affected, 0);

    Ok(())
}

/// Tests returning early from one specific window.
///
/// Expected: Ok(1) with the other window left live
#[tokio::test]
async fn ends_only_the_named_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    let current = service
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

    let affected = service.return_early(42, Some(current.id)).await?;
    assert_eq!(affected, 1);

    let upcoming = service.active_and_future_for_user(42).await?;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, future.id);

    Ok(())
}

/// Tests naming a window that belongs to someone else.
///
/// Expected: Err(WrongOwner)
#[tokio::test]
async fn fails_for_wrong_owner() -> Result<(), AppError> {
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

    let result = service.return_early(43, Some(window.id)).await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::WrongOwner(_)))
    ));

    Ok(())
}

/// Tests naming a window id that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AfkService::new(db, KeyedLocks::new());
    let result = service.return_early(42, Some(999)).await;

    assert!(matches!(result, Err(AppError::AfkErr(AfkError::NotFound(999)))));

    Ok(())
}
