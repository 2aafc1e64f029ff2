pub mod booking_dto;
pub mod upload_dto;
