use super::*;

/// Tests consuming a valid state.
///
/// Expected: Some the first time, None on replay
#[tokio::test]
async fn consumes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = OauthStateRepository::new(db);
    repo.create("abc".to_string(), 42, now + Duration::minutes(10))
        .await?;

    let first = repo.consume("abc", now).await?;
    let replay = repo.consume("abc", now).await?;

    assert_eq!(first.map(|s| s.discord_id), Some(42));
    assert!(replay.is_none());

    Ok(())
}

/// Tests consuming an expired state.
///
/// Expected: None, and the row is gone afterwards
#[tokio::test]
async fn expired_state_is_rejected_and_removed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = OauthStateRepository::new(db);
    repo.create("old".to_string(), 42, now - Duration::seconds(1))
        .await?;
    repo.create("fresh".to_string(), 43, now + Duration::minutes(5))
        .await?;

    assert!(repo.consume("old", now).await?.is_none());
    assert_eq!(repo.delete_expired(now).await?, 0);
    assert!(repo.consume("fresh", now).await?.is_some());

    Ok(())
}

/// Tests pruning expired states.
///
/// Expected: only expired rows deleted
#[tokio::test]
async fn deletes_expired_states() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = OauthStateRepository::new(db);
    repo.create("a".to_string(), 1, now - Duration::minutes(1)).await?;
    repo.create("b".to_string(), 2, now + Duration::minutes(1)).await?;

    assert_eq!(repo.delete_expired(now).await?, 1);
    assert!(repo.consume("b", now).await?.is_some());

    Ok(())
}
