use super::*;

/// Tests explicitly adding a member.
///
/// Expected: Ok with an open interval and the user row created
#[tokio::test]
async fn opens_interval_and_creates_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    let membership = service.add_member(add_param(1, "111")).await?;

    assert_eq!(membership.user_id, 1);
    assert_eq!(membership.clan_role_id, "111");
    assert!(membership.is_active);
    assert!(membership.left_at.is_none());

    let user = UserRepository::new(db).find_by_discord_id(1).await?;
    assert!(user.is_some());

    Ok(())
}

/// Tests the strict rejection of a duplicate active interval.
///
/// The explicit add must not silently no-op; this protects the audit trail
/// from at-least-once roster delivery.
///
/// Expected: Err(AlreadyMember)
#[tokio::test]
async fn rejects_duplicate_active_interval() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    service.add_member(add_param(1, "111")).await?;

    let result = service.add_member(add_param(1, "111")).await;

    assert!(matches!(
        result,
        Err(AppError::MembershipErr(MembershipError::AlreadyMember { .. }))
    ));

    Ok(())
}

/// Tests adding the same user to a second clan.
///
/// The one-active-interval constraint is per (user, clan) pair.
///
/// Expected: Ok
#[tokio::test]
async fn allows_membership_in_another_clan() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    service.add_member(add_param(1, "111")).await?;
    let second = service.add_member(add_param(1, "222")).await?;

    assert_eq!(second.clan_role_id, "222");

    Ok(())
}

/// Tests re-adding after an explicit removal.
///
/// Expected: Ok with a second, distinct interval
#[tokio::test]
async fn allows_rejoin_after_removal() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_membership_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = MembershipService::new(db, KeyedLocks::new());
    let first = service.add_member(add_param(1, "111")).await?;
    service.remove_member(1, "111").await?;
    let second = service.add_member(add_param(1, "111")).await?;

    assert_ne!(first.id, second.id);

    Ok(())
}
