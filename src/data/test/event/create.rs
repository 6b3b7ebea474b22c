use super::*;

/// Tests creating an event.
///
/// Verifies the row starts active with every flag unset and the temp role id stored.
///
/// Expected: Ok with an active event
#[tokio::test]
async fn creates_active_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_time = Utc.with_ymd_and_hms(2026, 5, 1, 23, 0, 0).unwrap();
    let repo = EventRepository::new(db);
    let event = repo
        .create(CreateEventParams {
            guild_id: 100,
            channel_id: 200,
            creator_id: 300,
            title: "Vault of Glass".to_string(),
            description: None,
            activity_type: "Raid".to_string(),
            max_attendees: 6,
            event_time,
            temp_role_id: Some(400),
        })
        .await?;

    assert_eq!(event.status, EventStatus::Active);
    assert_eq!(event.guild_id, 100);
    assert_eq!(event.temp_role_id, Some(400));
    assert_eq!(event.event_time, event_time);
    assert!(event.message_id.is_none());
    assert!(!event.reminder_sent && !event.confirmation_sent && !event.attendance_checked);

    let stored = entity::prelude::Event::find_by_id(event.id).one(db).await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests looking an event up by its announcement message.
///
/// Expected: Ok(Some) for the announced message, Ok(None) otherwise
#[tokio::test]
async fn finds_by_message_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = EventFactory::new(db).message_id("9001").build().await?;

    let repo = EventRepository::new(db);
    let found = repo.find_by_message_id(9001).await?;
    let missing = repo.find_by_message_id(9002).await?;

    assert_eq!(found.map(|e| e.id), Some(created.id));
    assert!(missing.is_none());

    Ok(())
}
