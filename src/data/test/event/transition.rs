use super::*;

/// Tests cancelling an active event.
///
/// Expected: Ok(Some) with status cancelled and the deletion time stored
#[tokio::test]
async fn cancels_active_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).build().await?;
    let delete_after = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();

    let repo = EventRepository::new(db);
    let result = repo
        .transition(
            event.id,
            EventStatus::Active,
            EventStatus::Cancelled,
            Some(delete_after),
        )
        .await?;

    let updated = result.expect("transition applied");
    assert_eq!(updated.status, EventStatus::Cancelled);
    assert_eq!(updated.delete_message_after, Some(delete_after));

    Ok(())
}

/// Tests that a transition from a status the event no longer has is a no-op.
///
/// A second cancel, or completing an event that was cancelled in between, must not
/// touch the row.
///
/// Expected: Ok(None) and the row unchanged
#[tokio::test]
async fn stale_transition_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).status("cancelled").build().await?;

    let repo = EventRepository::new(db);
    let again = repo
        .transition(event.id, EventStatus::Active, EventStatus::Cancelled, None)
        .await?;
    let complete = repo
        .transition(event.id, EventStatus::Active, EventStatus::Completed, None)
        .await?;

    assert!(again.is_none());
    assert!(complete.is_none());
    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.status, EventStatus::Cancelled);

    Ok(())
}

/// Tests that edges outside the lifecycle are refused even when the status matches.
///
/// Expected: Ok(None) for completed -> active
#[tokio::test]
async fn refuses_illegal_edge() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).status("completed").build().await?;

    let repo = EventRepository::new(db);
    let result = repo
        .transition(event.id, EventStatus::Completed, EventStatus::Active, None)
        .await?;

    assert!(result.is_none());
    assert_eq!(
        repo.find_by_id(event.id).await?.unwrap().status,
        EventStatus::Completed
    );

    Ok(())
}
