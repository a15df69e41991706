// Applicant resumes: one stored file per email, overwritten on re-upload.

pub mod handlers;
pub mod service;
