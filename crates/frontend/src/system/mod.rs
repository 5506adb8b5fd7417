pub mod auth;
pub mod pages;
pub mod temporary_users;
