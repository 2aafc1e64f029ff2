pub mod booking;
pub mod booking_reference;
pub mod document;
pub mod traveler;
