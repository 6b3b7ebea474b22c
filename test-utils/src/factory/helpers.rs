//! Shared helpers for the factories.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter backing `next_id`, starting well above zero so generated ids look like
/// snowflakes and never parse as zero.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1_000);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an event together with one RSVP per `(user_id, status)` pair.
///
/// RSVPs are inserted one second apart in the given order so their `responded_at`
/// ordering matches the slice order.
///
/// # Arguments
/// - `db` - Database connection
/// - `rsvps` - Pairs of user id and RSVP status string
///
/// # Returns
/// - `Ok((event, rsvps))` - The event and the created RSVP rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_event_with_rsvps(
    db: &DatabaseConnection,
    rsvps: &[(&str, &str)],
) -> Result<(entity::event::Model, Vec<entity::rsvp::Model>), DbErr> {
    let event = crate::factory::event::create_event(db).await?;
    let base = chrono::Utc::now() - chrono::Duration::hours(1);

    let mut created = Vec::with_capacity(rsvps.len());
    for (offset, (user_id, status)) in rsvps.iter().enumerate() {
        let rsvp = crate::factory::rsvp::RsvpFactory::new(db, event.id, *user_id)
            .status(*status)
            .responded_at(base + chrono::Duration::seconds(offset as i64))
            .build()
            .await?;
        created.push(rsvp);
    }

    Ok((event, created))
}
