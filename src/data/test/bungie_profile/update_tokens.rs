use super::*;

/// Tests storing refreshed tokens.
///
/// Expected: tokens and expiry replaced, identity unchanged
#[tokio::test]
async fn replaces_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    BungieProfileFactory::new(db, "42")
        .membership_id("999")
        .token_expires_at(now)
        .build()
        .await?;

    let repo = BungieProfileRepository::new(db);
    let updated = repo
        .update_tokens(
            42,
            "new-access".to_string(),
            "new-refresh".to_string(),
            now + Duration::hours(1),
        )
        .await?
        .unwrap();

    assert_eq!(updated.access_token, "new-access");
    assert_eq!(updated.refresh_token, "new-refresh");
    assert_eq!(updated.membership_id, "999");
    assert!(!updated.is_token_expired(now));

    Ok(())
}

/// Tests refreshing tokens for a user that never linked.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unknown_user_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BungieProfileRepository::new(db);
    let result = repo
        .update_tokens(1, "a".to_string(), "b".to_string(), Utc::now())
        .await?;

    assert!(result.is_none());

    Ok(())
}
