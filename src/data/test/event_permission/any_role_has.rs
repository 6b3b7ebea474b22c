use super::*;

/// Tests permission lookups for a member's roles.
///
/// Expected: true only when one of the roles holds that exact permission in that guild
#[tokio::test]
async fn matches_role_permission_and_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventPermissionRepository::new(db);
    repo.grant(1, 10, EventPermissionKind::CreateEvents).await?;
    repo.grant(2, 20, EventPermissionKind::ManageAnyRsvp).await?;

    assert!(
        repo.any_role_has(1, &[5, 10], EventPermissionKind::CreateEvents)
            .await?
    );
    assert!(
        !repo
            .any_role_has(1, &[10], EventPermissionKind::DeleteAnyEvent)
            .await?
    );
    assert!(
        !repo
            .any_role_has(1, &[20], EventPermissionKind::ManageAnyRsvp)
            .await?
    );
    assert!(!repo.any_role_has(1, &[], EventPermissionKind::CreateEvents).await?);

    assert!(repo.guild_has_any(1, EventPermissionKind::CreateEvents).await?);
    assert!(!repo.guild_has_any(2, EventPermissionKind::CreateEvents).await?);

    Ok(())
}
