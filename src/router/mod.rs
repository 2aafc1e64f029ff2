pub mod booking_router;
pub mod reminder_router;
pub mod upload_router;
