use super::*;

/// Tests a user changing their own answer.
///
/// Expected: status and timestamp replaced, attendance reset to pending
#[tokio::test]
async fn user_change_resets_attendance() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    let rsvp = RsvpFactory::new(db, event.id, "42")
        .attendance("absent")
        .build()
        .await?;
    let at = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();

    let repo = RsvpRepository::new(db);
    let updated = repo
        .update_status(rsvp.id, RsvpStatus::NotGoing, at, true)
        .await?
        .unwrap();

    assert_eq!(updated.status, RsvpStatus::NotGoing);
    assert_eq!(updated.responded_at, at);
    assert_eq!(updated.attendance, AttendanceStatus::Pending);

    Ok(())
}

/// Tests a manager override.
///
/// Expected: status replaced, recorded attendance kept
#[tokio::test]
async fn manager_change_keeps_attendance() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    let rsvp = RsvpFactory::new(db, event.id, "42")
        .attendance("attended")
        .build()
        .await?;

    let repo = RsvpRepository::new(db);
    let updated = repo
        .update_status(rsvp.id, RsvpStatus::Waitlisted, Utc::now(), false)
        .await?
        .unwrap();

    assert_eq!(updated.status, RsvpStatus::Waitlisted);
    assert_eq!(updated.attendance, AttendanceStatus::Attended);

    Ok(())
}

/// Tests updating a response that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_rsvp_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RsvpRepository::new(db);
    let result = repo
        .update_status(999, RsvpStatus::Going, Utc::now(), true)
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests recording attendance for a response.
///
/// Expected: only the targeted user's attendance changes
#[tokio::test]
async fn sets_attendance() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    create_rsvp(db, event.id, "1", "going").await?;
    create_rsvp(db, event.id, "2", "going").await?;

    let repo = RsvpRepository::new(db);
    repo.set_attendance(event.id, 1, AttendanceStatus::Absent).await?;

    assert_eq!(
        repo.find(event.id, 1).await?.unwrap().attendance,
        AttendanceStatus::Absent
    );
    assert_eq!(
        repo.find(event.id, 2).await?.unwrap().attendance,
        AttendanceStatus::Pending
    );

    Ok(())
}
