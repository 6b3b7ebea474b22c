use super::*;

/// Tests inserting a new guild configuration.
///
/// Expected: Ok with every field stored as given
#[tokio::test]
async fn inserts_new_config() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = ServerConfig {
        digest_channel_id: Some(10),
        mod_channel_id: Some(20),
        ..ServerConfig::empty(1)
    };

    let repo = ServerConfigRepository::new(db);
    let stored = repo.upsert(&config).await?;

    assert_eq!(stored, config);

    Ok(())
}

/// Tests replacing an existing configuration, including clearing a field.
///
/// Expected: Ok with the new values and the cleared field set to None
#[tokio::test]
async fn replaces_existing_config() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ServerConfigFactory::new(db, "1")
        .digest_channel_id("10")
        .penalty_role_id("30")
        .build()
        .await?;

    let repo = ServerConfigRepository::new(db);
    let mut config = repo.get(1).await?.unwrap();
    config.digest_channel_id = None;
    config.ranking_channel_id = Some(11);
    repo.upsert(&config).await?;

    let stored = repo.get(1).await?.unwrap();
    assert_eq!(stored.digest_channel_id, None);
    assert_eq!(stored.ranking_channel_id, Some(11));
    assert_eq!(stored.penalty_role_id, Some(30));

    Ok(())
}
