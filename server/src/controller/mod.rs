pub mod address;
pub mod auth;
