use super::*;

/// Tests storing and then replacing a guild's tier roles.
///
/// Expected: the second upsert overwrites every tier
#[tokio::test]
async fn replaces_tier_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RankingRolesRepository::new(db);
    assert!(repo.get(1).await?.is_none());

    repo.upsert(1, [11, 12, 13, 14]).await?;
    let replaced = repo.upsert(1, [21, 22, 23, 24]).await?;

    assert_eq!(replaced.tier_role_ids, [21, 22, 23, 24]);
    assert_eq!(repo.get(1).await?.unwrap().role_for_tier(4), Some(24));

    Ok(())
}
