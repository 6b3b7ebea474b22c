use super::*;

fn invite(membership_id: &str, expires_at: chrono::DateTime<Utc>) -> PendingClanInvite {
    PendingClanInvite {
        membership_id: membership_id.to_string(),
        membership_type: 3,
        bungie_name: format!("Guardian#{}", membership_id),
        guild_id: 1,
        message_id: 500,
        expires_at,
    }
}

/// Tests tracking and untracking an announced applicant.
///
/// Expected: find returns the tracked row until it is untracked
#[tokio::test]
async fn tracks_and_untracks() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = PendingClanInviteRepository::new(db);
    let tracked = repo.track(invite("4611", now + Duration::days(7))).await?;

    assert_eq!(repo.find("4611").await?, Some(tracked));
    assert!(repo.untrack("4611").await?);
    assert!(!repo.untrack("4611").await?);
    assert!(repo.find("4611").await?.is_none());

    Ok(())
}

/// Tests dropping invites whose tracking window has passed.
///
/// Expected: only expired rows removed
#[tokio::test]
async fn deletes_expired() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_bungie_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = PendingClanInviteRepository::new(db);
    repo.track(invite("1", now - Duration::hours(1))).await?;
    repo.track(invite("2", now + Duration::hours(1))).await?;

    assert_eq!(repo.delete_expired(now).await?, 1);
    assert!(repo.find("1").await?.is_none());
    assert!(repo.find("2").await?.is_some());

    Ok(())
}
