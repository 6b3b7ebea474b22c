use super::*;

/// Tests moving a completed event to its terminal state.
///
/// Expected: Ok(Some) with status message_deleted_completed and no message id
#[tokio::test]
async fn completes_deletion_and_clears_message() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db)
        .status("completed")
        .message_id("777")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let updated = repo
        .mark_message_deleted(event.id, EventStatus::Completed)
        .await?
        .unwrap();

    assert_eq!(updated.status, EventStatus::MessageDeletedCompleted);
    assert!(updated.message_id.is_none());

    Ok(())
}

/// Tests that an active event cannot skip straight to a deletion state.
///
/// Expected: Ok(None)
#[tokio::test]
async fn active_event_is_not_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).message_id("778").build().await?;

    let repo = EventRepository::new(db);
    let result = repo
        .mark_message_deleted(event.id, EventStatus::Active)
        .await?;

    assert!(result.is_none());
    assert_eq!(
        repo.find_by_id(event.id).await?.unwrap().message_id,
        Some(778)
    );

    Ok(())
}
