use super::*;

/// Tests that responses come back in first-come order.
///
/// Rows are inserted out of order; equal timestamps fall back to insertion id.
///
/// Expected: ordered by responded_at then id, other events excluded
#[tokio::test]
async fn orders_by_response_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = create_event(db).await?;
    let other = create_event(db).await?;
    let base = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();

    RsvpFactory::new(db, event.id, "3")
        .responded_at(base + Duration::minutes(5))
        .build()
        .await?;
    RsvpFactory::new(db, event.id, "1")
        .responded_at(base)
        .build()
        .await?;
    RsvpFactory::new(db, event.id, "2")
        .responded_at(base)
        .build()
        .await?;
    RsvpFactory::new(db, other.id, "9")
        .responded_at(base)
        .build()
        .await?;

    let repo = RsvpRepository::new(db);
    let users: Vec<u64> = repo
        .get_by_event(event.id)
        .await?
        .into_iter()
        .map(|r| r.user_id)
        .collect();

    assert_eq!(users, vec![1, 2, 3]);

    Ok(())
}
