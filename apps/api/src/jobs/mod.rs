// Job postings: CRUD plus the company-filtered listing.

pub mod handlers;
pub mod service;
