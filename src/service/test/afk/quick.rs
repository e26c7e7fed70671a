use super::*;

use crate::util::parse::end_of_day;

fn quick_param(discord_id: u64, days: Option<i64>) -> QuickAfkParam {
    QuickAfkParam {
        discord_id,
        username: format!("user{}", discord_id),
        display_name: None,
        clan_role_id: None,
        days,
        reason: Some("raid night".to_string()),
    }
}

/// Tests the quick declaration without a day count.
///
/// Expected: Ok with the window running from now to the end of today, active
#[tokio::test]
async fn ends_at_end_of_current_day() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AfkService::new(db, KeyedLocks::new());
    let window = service.quick(quick_param(42, None)).await?;

    assert!(window.is_active);
    assert_eq!(window.end_at, end_of_day(window.start_at));

    Ok(())
}

/// Tests the quick declaration with a day count.
///
/// Expected: Ok with the window ending at 23:59:59 that many days ahead
#[tokio::test]
async fn ends_days_ahead() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AfkService::new(db, KeyedLocks::new());
    let window = service.quick(quick_param(42, Some(2))).await?;

    assert_eq!(window.end_at, end_of_day(window.start_at + Duration::days(2)));

    Ok(())
}

/// Tests rejecting a non-positive day count.
///
/// Expected: Err(InvalidDuration)
#[tokio::test]
async fn rejects_non_positive_days() -> Result<(), AppError> {
    let test = TestBuilder::new().with_afk_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AfkService::new(db, KeyedLocks::new());
    let result = service.quick(quick_param(42, Some(0))).await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::InvalidDuration(0)))
    ));

    Ok(())
}

/// Tests that the quick path still runs the overlap check.
///
/// Expected: Err(OverlappingWindow) when a live window covers today
#[tokio::test]
async fn still_checks_overlap() -> Result<(), AppError> {
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

    let result = service.quick(quick_param(42, None)).await;

    assert!(matches!(
        result,
        Err(AppError::AfkErr(AfkError::OverlappingWindow { .. }))
    ));

    Ok(())
}
