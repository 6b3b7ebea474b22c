use super::*;

/// Tests designating and undesignating channels.
///
/// Adding a channel twice keeps a single row.
///
/// Expected: guild list reflects adds and removes, removing twice returns false
#[tokio::test]
async fn adds_and_removes_channels() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_config_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DesignatedChannelRepository::new(db);
    repo.add(1, 100).await?;
    repo.add(1, 100).await?;
    repo.add(1, 101).await?;
    repo.add(2, 200).await?;

    let mut channels = repo.get_by_guild(1).await?;
    channels.sort();
    assert_eq!(channels, vec![100, 101]);

    assert!(repo.remove(100).await?);
    assert!(!repo.remove(100).await?);
    assert_eq!(repo.get_by_guild(1).await?, vec![101]);

    Ok(())
}
