pub mod booking_store;
pub mod email;
pub mod error;
pub mod logger;
pub mod notification;
