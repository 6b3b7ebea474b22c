use super::*;

fn params(id: i32) -> UpdateEventParams {
    UpdateEventParams {
        id,
        title: "Duality".to_string(),
        description: Some("Bring a sword".to_string()),
        activity_type: "Dungeon".to_string(),
        max_attendees: 3,
        event_time: Utc.with_ymd_and_hms(2026, 6, 1, 22, 0, 0).unwrap(),
    }
}

/// Tests editing an active event.
///
/// Expected: Ok(Some) with every editable field replaced and the status unchanged
#[tokio::test]
async fn updates_active_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db).build().await?;

    let repo = EventRepository::new(db);
    let updated = repo.update_details(params(event.id)).await?.unwrap();

    assert_eq!(updated.title, "Duality");
    assert_eq!(updated.activity_type, "Dungeon");
    assert_eq!(updated.max_attendees, 3);
    assert_eq!(updated.status, EventStatus::Active);

    Ok(())
}

/// Tests that ended events cannot be edited.
///
/// Expected: Ok(None) and the title unchanged
#[tokio::test]
async fn refuses_ended_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db)
        .title("Old")
        .status("cancelled")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let result = repo.update_details(params(event.id)).await?;

    assert!(result.is_none());
    assert_eq!(repo.find_by_id(event.id).await?.unwrap().title, "Old");

    Ok(())
}
