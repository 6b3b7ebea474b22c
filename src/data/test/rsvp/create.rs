use super::*;

/// Tests recording a first response.
///
/// Expected: Ok with the given status and pending attendance
#[tokio::test]
async fn creates_with_pending_attendance() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();

    let repo = RsvpRepository::new(db);
    let rsvp = repo.create(event.id, 42, RsvpStatus::Maybe, at).await?;

    assert_eq!(rsvp.user_id, 42);
    assert_eq!(rsvp.status, RsvpStatus::Maybe);
    assert_eq!(rsvp.attendance, AttendanceStatus::Pending);
    assert_eq!(rsvp.responded_at, at);

    let found = repo.find(event.id, 42).await?;
    assert_eq!(found.map(|r| r.id), Some(rsvp.id));
    assert!(repo.find(event.id, 43).await?.is_none());

    Ok(())
}
