use super::*;

/// Tests collecting a guild's responses with their event times.
///
/// Expected: responses of the guild's events only, each carrying its event time
#[tokio::test]
async fn pairs_responses_with_event_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let when = Utc.with_ymd_and_hms(2026, 4, 10, 22, 0, 0).unwrap();
    let event = EventFactory::new(db)
        .guild_id("5")
        .event_time(when)
        .build()
        .await?;
    let elsewhere = EventFactory::new(db).guild_id("6").build().await?;

    RsvpFactory::new(db, event.id, "1")
        .attendance("attended")
        .build()
        .await?;
    create_rsvp(db, elsewhere.id, "2", "going").await?;

    let repo = RsvpRepository::new(db);
    let activity = repo.get_activity_by_guild(5).await?;

    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].user_id, 1);
    assert_eq!(activity[0].attendance, AttendanceStatus::Attended);
    assert_eq!(activity[0].event_time, when);

    Ok(())
}
