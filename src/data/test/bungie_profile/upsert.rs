use super::*;

fn account(membership_id: &str, name: &str) -> LinkedAccount {
    LinkedAccount {
        membership_id: membership_id.to_string(),
        membership_type: 3,
        bungie_name: name.to_string(),
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        token_expires_at: Utc.with_ymd_and_hms(2026, 5, 1, 21, 0, 0).unwrap(),
    }
}

/// Tests linking and then relinking a Discord user.
///
/// Expected: one profile per Discord user holding the latest account
#[tokio::test]
async fn relink_replaces_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BungieProfileRepository::new(db);
    repo.upsert(42, account("111", "Old#0001")).await?;
    let relinked = repo.upsert(42, account("222", "New#0002")).await?;

    assert_eq!(relinked.membership_id, "222");
    assert_eq!(repo.get_all().await?.len(), 1);
    assert!(repo.find_by_membership_id("111").await?.is_none());
    assert_eq!(
        repo.find_by_membership_id("222").await?.map(|p| p.discord_id),
        Some(42)
    );

    Ok(())
}
