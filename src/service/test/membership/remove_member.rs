use super::*;

/// Tests explicitly removing a member.
///
/// Expected: Ok with the interval closed and `left_at` stamped
#[tokio::test]
async fn closes_active_interval() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    service.add_member(add_param(1, "111")).await?;

    let closed = service.remove_member(1, "111").await?;

    assert!(!closed.is_active);
    assert!(closed.left_at.is_some());

    Ok(())
}

/// Tests removing a user who has no active interval.
///
/// Expected: Err(NotMember)
#[tokio::test]
async fn fails_when_not_a_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    let result = service.remove_member(1, "111").await;

    assert!(matches!(
        result,
        Err(AppError::MembershipErr(MembershipError::NotMember { .. }))
    ));

    Ok(())
}

/// Tests that removing twice fails the second time.
///
/// Expected: Err(NotMember) once the interval is closed
#[tokio::test]
async fn fails_on_second_removal() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    service.add_member(add_param(1, "111")).await?;
    service.remove_member(1, "111").await?;

    let result = service.remove_member(1, "111").await;

    assert!(matches!(
        result,
        Err(AppError::MembershipErr(MembershipError::NotMember { .. }))
    ));

    Ok(())
}
