use super::*;

/// Tests the declare-then-sweep scenario.
///
/// A window declared for the future starts inactive. Once its start passes
/// (simulated by shifting the stored interval into the past), the sweep flips
/// it active; the query layer then reports the user as away.
#[tokio::test]
async fn sweep_activates_window_once_started() -> Result<(), AppError> {
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

    // Nothing to do while the window is still ahead
    assert_eq!(service.refresh_activation().await?, 0);

    // Simulate the clock reaching two hours in: shift the window back
    let entity = entity::prelude::AfkWindow::find_by_id(window.id)
        .one(db)
        .await?
        .unwrap();
    let mut active: entity::afk_window::ActiveModel = entity.into();
    active.start_at = ActiveValue::Set(now - Duration::hours(1));
    active.end_at = ActiveValue::Set(now + Duration::hours(1));
    active.update(db).await?;

    assert_eq!(service.refresh_activation().await?, 1);

    let listed = service.active_now(&AfkFilter::default()).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].1.id, window.id);
    assert!(listed[0].1.is_active);

    Ok(())
}

/// Tests that the sweep expires a window whose end has passed.
///
/// Expected: the flag drops and the user leaves the active listing
#[tokio::test]
async fn sweep_expires_finished_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user_with_id(db, "42").await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now - Duration::hours(3))
        .end_at(now - Duration::hours(1))
        .is_active(true)
        .build()
        .await?;

    let service = AfkService::new(db, KeyedLocks::new());
    assert_eq!(service.refresh_activation().await?, 1);

    let listed = service.active_now(&AfkFilter::default()).await?;
    assert!(listed.is_empty());

    Ok(())
}
