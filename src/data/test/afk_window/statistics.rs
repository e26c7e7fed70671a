use super::*;

/// Tests the aggregate counts and the mean duration.
///
/// One in-progress 4-hour window and one future 1-hour window for the same
/// user: total 2, one unique user, one active, one scheduled, mean 2.5 hours.
#[tokio::test]
async fn computes_counts_and_mean_duration() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now - Duration::hours(2))
        .end_at(now + Duration::hours(2))
        .build()
        .await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(now + Duration::hours(3))
        .end_at(now + Duration::hours(4))
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let stats = repo.statistics(None, now).await?;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.unique_users, 1);
    assert_eq!(stats.active_now, 1);
    assert_eq!(stats.scheduled_future, 1);
    assert_eq!(stats.mean_duration, Some(Duration::minutes(150)));

    Ok(())
}

/// Tests that the early-return instant is used as the effective end.
///
/// A 4-hour window ended after 1 hour counts as 1 hour of duration.
#[tokio::test]
async fn mean_uses_early_return_as_effective_end() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let start = now - Duration::hours(2);
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .start_at(start)
        .end_at(start + Duration::hours(4))
        .is_active(false)
        .ended_early_at(Some(start + Duration::hours(1)))
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let stats = repo.statistics(None, now).await?;

    assert_eq!(stats.mean_duration, Some(Duration::hours(1)));

    Ok(())
}

/// Tests scoping the statistics to one clan via the owners' clan tags.
///
/// Expected: the other clan's windows are not counted
#[tokio::test]
async fn scopes_to_clan() -> Result<(), AppError> {
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
    let stats = repo.statistics(Some("111"), now).await?;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.unique_users, 1);

    Ok(())
}

/// Tests that soft-deleted windows are excluded from every count.
///
/// Expected: empty statistics with no mean duration
#[tokio::test]
async fn excludes_soft_deleted_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let user = factory::create_user(db).await?;
    AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .is_deleted(true)
        .is_active(false)
        .build()
        .await?;

    let repo = AfkWindowRepository::new(db);
    let stats = repo.statistics(None, now).await?;

    assert_eq!(stats.total, 0);
    assert_eq!(stats.unique_users, 0);
    assert_eq!(stats.mean_duration, None);

    Ok(())
}
