use super::*;

/// Tests summing voice time per user inside the window.
///
/// Expected: sessions before `since` and from other guilds ignored, highest total first
#[tokio::test]
async fn sums_per_user_in_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VoiceSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let since = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();

    create_voice_session(db, "1", "10", since + Duration::hours(1), 600).await?;
    create_voice_session(db, "1", "10", since + Duration::hours(5), 600).await?;
    create_voice_session(db, "1", "11", since + Duration::hours(2), 3600).await?;
    create_voice_session(db, "1", "12", since - Duration::hours(1), 9000).await?;
    create_voice_session(db, "2", "10", since + Duration::hours(1), 9000).await?;

    let repo = VoiceSessionRepository::new(db);
    let totals = repo.get_totals_since(1, since).await?;

    let pairs: Vec<(u64, i64)> = totals.iter().map(|t| (t.user_id, t.seconds)).collect();
    assert_eq!(pairs, vec![(11, 3600), (10, 1200)]);
    assert_eq!(totals[0].hours(), 1.0);

    Ok(())
}
