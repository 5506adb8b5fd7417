pub mod auth;
pub mod roles;
pub mod temporary_users;
