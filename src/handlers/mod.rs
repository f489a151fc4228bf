pub mod auth;
pub mod documents;
pub mod finance;
pub mod messages;
pub mod rbac;
pub mod units;
pub mod users;
