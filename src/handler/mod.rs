pub mod booking_handler;
pub mod reminder_handler;
pub mod upload_handler;
