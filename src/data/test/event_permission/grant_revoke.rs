use super::*;

/// Tests granting a permission twice and revoking it twice.
///
/// Expected: true then false for both grant and revoke
#[tokio::test]
async fn grant_and_revoke_report_changes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventPermissionRepository::new(db);
    let perm = EventPermissionKind::EditAnyEvent;

    assert!(repo.grant(1, 10, perm).await?);
    assert!(!repo.grant(1, 10, perm).await?);
    assert_eq!(repo.get_by_guild(1).await?.len(), 1);

    assert!(repo.revoke(1, 10, perm).await?);
    assert!(!repo.revoke(1, 10, perm).await?);
    assert!(repo.get_by_guild(1).await?.is_empty());

    Ok(())
}
