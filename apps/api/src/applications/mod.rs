// Applying to jobs, reviewing applications and listing them.

pub mod handlers;
pub mod service;
