use super::*;

/// Tests that each one-shot flag flips exactly once.
///
/// Expected: true on the first call, false on every later call, flag stays set
#[tokio::test]
async fn flags_flip_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).build().await?;
    let repo = EventRepository::new(db);

    assert!(repo.mark_reminder_sent(event.id).await?);
    assert!(!repo.mark_reminder_sent(event.id).await?);
    assert!(repo.mark_confirmation_sent(event.id).await?);
    assert!(!repo.mark_confirmation_sent(event.id).await?);
    assert!(repo.mark_attendance_checked(event.id).await?);
    assert!(!repo.mark_attendance_checked(event.id).await?);

    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert!(stored.reminder_sent);
    assert!(stored.confirmation_sent);
    assert!(stored.attendance_checked);

    Ok(())
}

/// Tests the cached external id setters.
///
/// Expected: ids stored and the voice channel id clearable
#[tokio::test]
async fn sets_and_clears_cached_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).temp_role_id("55").build().await?;
    let repo = EventRepository::new(db);

    repo.set_message_id(event.id, 11).await?;
    repo.set_thread_id(event.id, 22).await?;
    repo.set_voice_channel_id(event.id, Some(33)).await?;
    repo.clear_temp_role_id(event.id).await?;

    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.message_id, Some(11));
    assert_eq!(stored.thread_id, Some(22));
    assert_eq!(stored.voice_channel_id, Some(33));
    assert_eq!(stored.temp_role_id, None);

    repo.set_voice_channel_id(event.id, None).await?;
    assert_eq!(repo.find_by_id(event.id).await?.unwrap().voice_channel_id, None);

    Ok(())
}
