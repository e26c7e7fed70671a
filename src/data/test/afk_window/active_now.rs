use super::*;

/// Tests listing a window active right now together with its owner.
///
/// Expected: one entry pairing the user with the covering window
#[tokio::test]
async fn lists_active_window_with_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    let window = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let entries = repo.active_now(&AfkFilter::default(), now).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.discord_id.to_string(), user.discord_id);
    assert_eq!(entries[0].1.id, window.id);

    Ok(())
}

/// Tests the double guard against sweep latency.
///
/// A window the sweep has not caught up with yet (flag still set, but ended
/// early in the past) must not reappear in the listing.
///
/// Expected: empty result despite the stale active flag
#[tokio::test]
async fn excludes_recently_ended_despite_stale_flag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .is_active(true)
        .ended_early_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let entries = repo.active_now(&AfkFilter::default(), now).await?;

    assert!(entries.is_empty());

    Ok(())
}

/// Tests that future and soft-deleted windows never show as active.
///
/// Expected: empty result
#[tokio::test]
async fn excludes_future_and_deleted_windows() -> Result<(), AppError> {
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
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .is_deleted(true)
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let entries = repo.active_now(&AfkFilter::default(), now).await?;

    assert!(entries.is_empty());

    Ok(())
}

/// Tests the clan filter against the owners' current clan tags.
///
/// Expected: only the matching clan's member is listed
#[tokio::test]
async fn filters_by_clan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let sun_member = test_utils::factory::user::UserFactory::new(db)
        .clan_role_id(Some("111".to_string()))
        .build()
        .await?;
    let moon_member = test_utils::factory::user::UserFactory::new(db)
        .clan_role_id(Some("222".to_string()))
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&sun_member.discord_id)
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&moon_member.discord_id)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let filter = AfkFilter {
        clan_role_id: Some("111".to_string()),
        discord_id: None,
    };
    let entries = repo.active_now(&filter, now).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.discord_id.to_string(), sun_member.discord_id);

    Ok(())
}

/// Tests the user filter.
///
/// Expected: only the requested user's window is listed
#[tokio::test]
async fn filters_by_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&first.discord_id)
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&second.discord_id)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let filter = AfkFilter {
        clan_role_id: None,
        discord_id: Some(first.discord_id.parse().unwrap()),
    };
    let entries = repo.active_now(&filter, now).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.discord_id.to_string(), first.discord_id);

    Ok(())
}
