use super::*;

/// Tests reading configuration for a guild that never configured anything.
///
/// Expected: get returns None, get_or_default returns an empty config
#[tokio::test]
async fn unconfigured_guild_defaults_to_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerConfigRepository::new(db);

    assert!(repo.get(7).await?.is_none());
    assert_eq!(repo.get_or_default(7).await?, ServerConfig::empty(7));

    Ok(())
}

/// Tests the per-feature guild lists used by scheduled jobs.
///
/// Expected: each list holds only guilds with that setting present
#[tokio::test]
async fn filters_guilds_by_configured_feature() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ServerConfigFactory::new(db, "1")
        .digest_channel_id("10")
        .build()
        .await?;
    ServerConfigFactory::new(db, "2")
        .ranking_channel_id("20")
        .mod_channel_id("21")
        .build()
        .await?;
    ServerConfigFactory::new(db, "3")
        .clan_admin_id("30")
        .build()
        .await?;

    let repo = ServerConfigRepository::new(db);
    let ids = |configs: Vec<ServerConfig>| -> Vec<u64> {
        configs.into_iter().map(|c| c.guild_id).collect()
    };

    assert_eq!(ids(repo.get_with_digest_channel().await?), vec![1]);
    assert_eq!(ids(repo.get_with_ranking_channel().await?), vec![2]);
    assert_eq!(ids(repo.get_with_mod_channel().await?), vec![2]);
    assert_eq!(ids(repo.get_with_clan_admin().await?), vec![3]);

    Ok(())
}
