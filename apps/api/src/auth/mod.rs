// Company accounts: registration with logo upload, login, password reset.

pub mod handlers;
pub mod password;
pub mod service;
