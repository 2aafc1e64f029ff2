pub mod document_service;
pub mod reminder_service;
pub mod upload_service;
