pub mod auth;
pub mod document_service;
pub mod finance_service;
pub mod permissions;
pub mod user_service;
