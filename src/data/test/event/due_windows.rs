use super::*;

/// Tests the half-open reminder window `(lo, hi]`.
///
/// Expected: the event at `hi` is due, the one at `lo` is not, reminded and inactive events
/// are skipped
#[tokio::test]
async fn reminder_window_is_half_open() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let lo = now + Duration::minutes(14);
    let hi = now + Duration::minutes(16);

    let at_hi = EventFactory::new(db).event_time(hi).build().await?;
    let inside = EventFactory::new(db)
        .event_time(now + Duration::minutes(15))
        .build()
        .await?;
    EventFactory::new(db).event_time(lo).build().await?;
    EventFactory::new(db)
        .event_time(now + Duration::minutes(15))
        .reminder_sent(true)
        .build()
        .await?;
    EventFactory::new(db)
        .event_time(now + Duration::minutes(15))
        .status("cancelled")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let mut due: Vec<i32> = repo
        .get_due_reminders(lo, hi)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    due.sort();

    assert_eq!(due, vec![at_hi.id, inside.id]);

    Ok(())
}

/// Tests the closed voice channel window `[lo, hi]`.
///
/// Expected: both edges included, events with a channel excluded
#[tokio::test]
async fn voice_channel_window_is_closed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();
    let lo = now + Duration::minutes(59);
    let hi = now + Duration::minutes(61);

    let at_lo = EventFactory::new(db).event_time(lo).build().await?;
    let at_hi = EventFactory::new(db).event_time(hi).build().await?;
    EventFactory::new(db)
        .event_time(now + Duration::minutes(60))
        .voice_channel_id("1")
        .build()
        .await?;
    EventFactory::new(db)
        .event_time(hi + Duration::seconds(1))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let mut due: Vec<i32> = repo
        .get_needing_voice_channel(lo, hi)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    due.sort();

    assert_eq!(due, vec![at_lo.id, at_hi.id]);

    Ok(())
}

/// Tests selecting ended events whose announcement should be deleted.
///
/// Expected: only cancelled/completed rows with a past deletion time
#[tokio::test]
async fn due_message_deletions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();

    let cancelled = EventFactory::new(db)
        .status("cancelled")
        .delete_message_after(Some(now - Duration::minutes(1)))
        .build()
        .await?;
    let completed = EventFactory::new(db)
        .status("completed")
        .delete_message_after(Some(now))
        .build()
        .await?;
    EventFactory::new(db)
        .status("completed")
        .delete_message_after(Some(now + Duration::hours(1)))
        .build()
        .await?;
    EventFactory::new(db)
        .status("message_deleted_cancelled")
        .delete_message_after(Some(now - Duration::hours(1)))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let mut due: Vec<i32> = repo
        .get_due_message_deletions(now)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    due.sort();

    assert_eq!(due, vec![cancelled.id, completed.id]);

    Ok(())
}

/// Tests listing upcoming events of one guild in time order.
///
/// Expected: only the guild's active events inside the range, soonest first
#[tokio::test]
async fn upcoming_by_guild_is_ordered() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap();

    let later = EventFactory::new(db)
        .guild_id("1")
        .event_time(now + Duration::days(2))
        .build()
        .await?;
    let sooner = EventFactory::new(db)
        .guild_id("1")
        .event_time(now + Duration::hours(3))
        .build()
        .await?;
    let far = EventFactory::new(db)
        .guild_id("1")
        .event_time(now + Duration::days(10))
        .build()
        .await?;
    EventFactory::new(db)
        .guild_id("2")
        .event_time(now + Duration::hours(5))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let window: Vec<i32> = repo
        .get_upcoming_by_guild(1, now, Some(now + Duration::days(3)))
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    let beyond: Vec<i32> = repo
        .get_later_by_guild(1, now + Duration::days(3))
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    assert_eq!(window, vec![sooner.id, later.id]);
    assert_eq!(beyond, vec![far.id]);

    Ok(())
}
