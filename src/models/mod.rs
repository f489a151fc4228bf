pub mod auth;
pub mod finance;
pub mod message;
pub mod rbac;
pub mod unit;
