use super::*;

/// Tests persisting a finished session.
///
/// Expected: duration derived from the timestamps
#[tokio::test]
async fn derives_duration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VoiceSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let started_at = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let repo = VoiceSessionRepository::new(db);
    let session = repo
        .create(CreateVoiceSessionParams {
            user_id: 1,
            guild_id: 2,
            started_at,
            ended_at: started_at + Duration::minutes(90),
        })
        .await?;

    assert_eq!(session.duration_seconds, 5400);
    assert_eq!(session.guild_id, 2);

    Ok(())
}
