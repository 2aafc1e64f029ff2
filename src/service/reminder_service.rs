use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::booking_dto::ReminderSummary;
use crate::model::booking::Booking;
use crate::service::document_service::DocumentService;
use crate::util::booking_store::BookingStore;
use crate::util::email::EmailSender;
use crate::util::error::ServiceError;
use crate::util::notification::NotificationComposer;

/// Reminders go out when check-in is between these many days away, inclusive.
/// Sized so a daily run catches each booking once.
pub const REMINDER_WINDOW_START_DAYS: f64 = 6.5;
pub const REMINDER_WINDOW_END_DAYS: f64 = 7.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `now` until `check_in`
pub fn days_until(check_in: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (check_in - now).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub fn needs_reminder(booking: &Booking, has_documents: bool, now: DateTime<Utc>) -> bool {
    if has_documents || !booking.is_confirmed() {
        return false;
    }
    let Some(check_in) = booking.check_in_at() else {
        warn!(booking_id = %booking.booking_id, check_in = %booking.check_in_date, "Unparsable check-in date, skipping");
        return false;
    };
    let days = days_until(check_in, now);
    (REMINDER_WINDOW_START_DAYS..=REMINDER_WINDOW_END_DAYS).contains(&days)
}

pub struct ReminderService {
    pub store: Arc<dyn BookingStore>,
    pub documents: DocumentService,
    pub email: Arc<dyn EmailSender>,
    pub composer: NotificationComposer,
}

impl ReminderService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        email: Arc<dyn EmailSender>,
        composer: NotificationComposer,
    ) -> Self {
        let documents = DocumentService::new(store.clone());
        Self { store, documents, email, composer }
    }

    /// Bookings from the upcoming list that are due a reminder at `now`
    pub async fn due_bookings(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, ServiceError> {
        let upcoming = self.store.upcoming_bookings().await.map_err(|e| {
            error!("Failed to fetch upcoming bookings: {}", e);
            ServiceError::from(e)
        })?;

        let presence = join_all(
            upcoming
                .iter()
                .map(|b| self.documents.has_documents_or_false(&b.booking_id)),
        )
        .await;

        Ok(upcoming
            .into_iter()
            .zip(presence)
            .filter(|(booking, has_documents)| needs_reminder(booking, *has_documents, now))
            .map(|(booking, _)| booking)
            .collect())
    }

    /// One reminder per due booking; individual send failures are counted, not raised.
    #[instrument(skip(self), fields(now = %now))]
    pub async fn run(&self, now: DateTime<Utc>) -> Result<ReminderSummary, ServiceError> {
        let due = self.due_bookings(now).await?;
        info!("Found {} bookings needing document reminders", due.len());

        let results = join_all(due.iter().map(|booking| async move {
            let message = self.composer.document_reminder(booking);
            let result = self.email.send_email(message).await;
            if let Err(e) = &result {
                error!(booking_id = %booking.booking_id, "Failed to send document reminder: {}", e);
            }
            result
        }))
        .await;

        let sent = results.iter().filter(|r| r.is_ok()).count();
        let summary = ReminderSummary {
            processed: due.len(),
            sent,
            failed: results.len() - sent,
        };
        info!("Successfully sent {} of {} document reminders", summary.sent, summary.processed);
        Ok(summary)
    }
}
