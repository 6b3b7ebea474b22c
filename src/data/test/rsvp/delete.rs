use super::*;

/// Tests removing a response.
///
/// Expected: Ok(true) the first time, Ok(false) once it is gone
#[tokio::test]
async fn deletes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    create_rsvp(db, event.id, "42", "going").await?;

    let repo = RsvpRepository::new(db);

    assert!(repo.delete(event.id, 42).await?);
    assert!(!repo.delete(event.id, 42).await?);
    assert!(repo.find(event.id, 42).await?.is_none());

    Ok(())
}
