use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::model::booking::Booking;
use crate::util::booking_store::{BookingStore, BookingStoreError};

/// Read-only lookups against the booking store
#[derive(Clone)]
pub struct DocumentService {
    pub store: Arc<dyn BookingStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, BookingStoreError> {
        info!("Fetching booking");
        self.store.get_booking(booking_id).await
    }

    /// Whether the store holds documents for the booking
    #[instrument(skip(self))]
    pub async fn check_documents(&self, booking_id: &str) -> Result<bool, BookingStoreError> {
        self.store.has_documents(booking_id).await
    }

    /// Same as [`check_documents`](Self::check_documents), but any failure reads as "no documents".
    pub async fn has_documents_or_false(&self, booking_id: &str) -> bool {
        match self.check_documents(booking_id).await {
            Ok(has_documents) => has_documents,
            Err(e) => {
                warn!(booking_id = %booking_id, "Document check failed, assuming none: {}", e);
                false
            }
        }
    }
}
