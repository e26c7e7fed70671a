use super::*;

/// Tests detecting a partial overlap with an existing live window.
///
/// Expected: Ok(Some) with the existing window
#[tokio::test]
async fn detects_partial_overlap() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    let existing = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let conflict = repo
        .find_live_overlapping(
            user.discord_id.parse().unwrap(),
            now + Duration::hours(2),
            now + Duration::hours(4),
        )
        .await?;

    assert_eq!(conflict.map(|w| w.id), Some(existing.id));

    Ok(())
}

/// Tests that touching endpoints count as overlap (inclusive boundaries).
///
/// Expected: Ok(Some) when the probe starts exactly where the window ends
#[tokio::test]
async fn detects_touching_endpoints() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    let end = now + Duration::hours(3);
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(end)
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let conflict = repo
        .find_live_overlapping(user.discord_id.parse().unwrap(), end, end + Duration::hours(2))
        .await?;

    assert!(conflict.is_some());

    Ok(())
}

/// Tests that a window strictly outside the probe interval does not conflict.
///
/// Expected: Ok(None)
#[tokio::test]
async fn no_conflict_outside_interval() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let conflict = repo
        .find_live_overlapping(
            user.discord_id.parse().unwrap(),
            now + Duration::hours(4),
            now + Duration::hours(5),
        )
        .await?;

    assert!(conflict.is_none());

    Ok(())
}

/// Tests that soft-deleted and ended-early windows are excluded from the probe.
///
/// Expected: Ok(None) even though both intervals intersect
#[tokio::test]
async fn ignores_dead_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_deleted(true)
        .is_active(false)
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .ended_early_at(Some(now))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let conflict = repo
        .find_live_overlapping(
            user.discord_id.parse().unwrap(),
            now + Duration::hours(2),
            now + Duration::hours(4),
        )
        .await?;

    assert!(conflict.is_none());

    Ok(())
}

/// Tests that another user's windows never conflict.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_other_users_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&owner.discord_id)
        .start_at(now + Duration::hours(1))
        .end_at(now + Duration::hours(3))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let conflict = repo
        .find_live_overlapping(
            other.discord_id.parse().unwrap(),
            now + Duration::hours(1),
            now + Duration::hours(3),
        )
        .await?;

    assert!(conflict.is_none());

    Ok(())
}
