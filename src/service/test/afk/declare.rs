use super::*;

/// Tests declaring a window that has not started yet.
///
/// Expected: Ok with the activity flag off, and the user row created lazily
#[tokio::test]
async fn creates_future_window_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    let window = service
        .declare(declare_param(
            42,
            now + Duration::hours(1),
            now + Duration::hours(3),
        ))
        .await?;

    assert!(!window.is_active);
    assert_eq!(window.user_id, 42);

    let user = UserRepository::new(db).find_by_discord_id(42).await?;
    assert!(user.is_some());

    Ok(())
}

/// Tests declaring a window that covers the current instant.
///
/// Expected: Ok with the activity flag set at creation time
#[tokio::test]
async fn creates_covering_window_active() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    let window = service
        .declare(declare_param(
            42,
            now - Duration::minutes(5),
            now + Duration::hours(2),
        ))
        .await?;

    assert!(window.is_active);

    Ok(())
}

/// Tests rejecting a window whose end is not after its start.
///
/// Expected: Err(InvalidRange), nothing persisted
#[tokio::test]
async fn rejects_invalid_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());
    let result = service
        .declare(declare_param(
            42,
            now + Duration::hours(3),
            now + Duration::hours(3),
        ))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::InvalidRange { .. }))
    ));

    let rows = entity::prelude::AfkWindow::find().all(db).await?;
    assert!(rows.is_empty());

    Ok(())
}

/// Tests rejecting a declaration that collides with a live window.
///
/// The error carries the conflicting window's bounds and reason for the
/// user-facing message.
///
/// Expected: Err(OverlappingWindow) referencing the first window
#[tokio::test]
async fn rejects_overlap_with_conflict_details() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());

    let first = service
        .declare(declare_param(
            42,
            now + Duration::hours(1),
            now + Duration::hours(3),
        ))
        .await?;

    let result = service
        .declare(declare_param(
            42,
            now + Duration::hours(2),
            now + Duration::hours(4),
        ))
        .await;

    match result {
        Err(AppError::AfkErr(AfkError::OverlappingWindow { start, end, reason })) => {
            assert_eq!(start, first.start_at);
            assert_eq!(end, first.end_at);
            assert_eq!(reason.as_deref(), Some("vacation"));
        }
        other => panic!("expected OverlappingWindow, got {:?}", other.map(|w| w.id)),
    }

    // The rejected declaration must not have persisted anything
    let rows = entity::prelude::AfkWindow::find().all(db).await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}

/// Tests that touching endpoints count as overlap.
///
/// Expected: Err(OverlappingWindow) for a window starting exactly at the
/// existing window's end
#[tokio::test]
async fn rejects_touching_endpoints() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());

    let first = service
        .declare(declare_param(
            42,
            now + Duration::hours(1),
            now + Duration::hours(3),
        ))
        .await?;

    let result = service
        .declare(declare_param(42, first.end_at, first.end_at + Duration::hours(2)))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::OverlappingWindow { .. }))
    ));

    Ok(())
}

/// Tests declaring a window strictly outside the existing one.
///
/// Expected: Ok, both windows persisted
#[tokio::test]
async fn allows_disjoint_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let service = AfkService::new(db, KeyedLocks::new());

    service
        .declare(declare_param(
            42,
            now + Duration::hours(1),
            now + Duration::hours(3),
        ))
        .await?;
    service
        .declare(declare_param(
            42,
            now + Duration::hours(4),
            now + Duration::hours(5),
        ))
        .await?;

    let rows = entity::prelude::AfkWindow::find().all(db).await?;
    assert_eq!(rows.len(), 2);

    Ok(())
}

/// Tests that dead windows do not block new declarations.
///
/// Soft-deleted and ended-early windows are excluded from the overlap check.
///
/// Expected: Ok despite both intervals intersecting the new one
#[tokio::test]
async fn ignores_dead_windows_in_overlap_check() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user_with_id(db, "42").await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_active(false)
        .is_deleted(true)
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_active(false)
        .ended_early_at(Some(now))
        .build()
        .await?;

    let service = AfkService::new(db, KeyedLocks::new());
    let window = service
        .declare(declare_param(
            42,
            now + Duration::hours(2),
            now + Duration::hours(4),
        ))
        .await?;

    assert!(!window.is_active);

    Ok(())
}
