use super::*;

/// Tests creating a new user.
///
/// Verifies that the user repository successfully creates a new user record
/// with the specified Discord ID, username, display name and clan tag.
///
/// Expected: Ok with user created and all identity fields stored
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            username: "testuser".to_string(),
            display_name: Some("Test User".to_string()),
            clan_role_id: Some("111".to_string()),
        })
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "testuser");
    assert_eq!(user.display_name.as_deref(), Some("Test User"));
    assert_eq!(user.clan_role_id.as_deref(), Some("111"));

    Ok(())
}

/// Tests refreshing an existing user's identity.
///
/// Verifies that upserting the same Discord ID again replaces the username,
/// display name and clan tag with the freshly observed values.
///
/// Expected: Ok with all identity fields updated, no second row created
#[tokio::test]
async fn refreshes_identity_on_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    repo.upsert(UpsertUserParam {
        discord_id: 123456789,
        username: "oldname".to_string(),
        display_name: Some("Old Name".to_string()),
        clan_role_id: Some("111".to_string()),
    })
    .await?;

    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            username: "newname".to_string(),
            display_name: None,
            clan_role_id: Some("222".to_string()),
        })
        .await?;

    assert_eq!(user.username, "newname");
    assert_eq!(user.display_name, None);
    assert_eq!(user.clan_role_id.as_deref(), Some("222"));

    Ok(())
}
