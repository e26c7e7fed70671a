use super::*;

/// Tests soft-deleting all of a user's windows.
///
/// Expected: Ok(2) with both rows flagged deleted and inactive
#[tokio::test]
async fn soft_deletes_all_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(2))
        .end_at(now + Duration::hours(4))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let affected = repo
        .soft_delete_by_user(user.discord_id.parse().unwrap(), false, now)
        .await?;

    assert_eq!(affected, 2);

    let rows = entity::prelude::AfkWindow::find().all(db).await?;
    for row in rows {
        assert!(row.is_deleted);
        assert!(!row.is_active);
        assert!(row.ended_early_at.is_some());
    }

    Ok(())
}

/// Tests restricting the soft-delete to active windows.
///
/// Expected: Ok(1) with the future window left untouched
#[tokio::test]
async fn only_active_restricts_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .build()
        .await?;
    let future = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(2))
        .end_at(now + Duration::hours(4))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let affected = repo
        .soft_delete_by_user(user.discord_id.parse().unwrap(), true, now)
        .await?;

    assert_eq!(affected, 1);

    let untouched = entity::prelude::AfkWindow::find_by_id(future.id)
        .one(db)
        .await?
        .unwrap();
    assert!(!untouched.is_deleted);
    assert!(untouched.ended_early_at.is_none());

    Ok(())
}

/// Tests that a window ended early before the delete keeps its marker.
///
/// Expected: the original early-return instant survives the soft-delete
#[tokio::test]
async fn preserves_existing_early_return_stamp() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let earlier = now - Duration::hours(1);
    let user = factory::create_user(db).await?;
    let window = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .is_active(false)
        .ended_early_at(Some(earlier))
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    repo.soft_delete_by_user(user.discord_id.parse().unwrap(), false, now)
        .await?;

    let refreshed = entity::prelude::AfkWindow::find_by_id(window.id)
        .one(db)
        .await?
        .unwrap();
    assert!(refreshed.is_deleted);
    assert_eq!(refreshed.ended_early_at, Some(earlier));

    Ok(())
}

/// Tests soft-deleting a single window twice.
///
/// Expected: Ok(1) the first time, Ok(0) the second
#[tokio::test]
async fn soft_delete_by_id_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    let window = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    assert_eq!(repo.soft_delete_by_id(window.id, now).await?, 1);
    assert_eq!(repo.soft_delete_by_id(window.id, now).await?, 0);

    Ok(())
}
