pub mod book;
pub mod jwt;
pub mod pwd;
