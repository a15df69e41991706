//! Object storage for resumes and company logos.
//!
//! Files never land in Postgres; callers keep only the URL returned by
//! [`ObjectStore::put`].

pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use s3::S3ObjectStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },

    #[error("refusing to store an empty object at '{0}'")]
    EmptyObject(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key`, replacing any existing object, and returns
    /// the durable URL the object is served from.
    async fn put(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<String, StorageError>;
}

/// Storage key for an applicant's resume. Deterministic per email so a
/// re-upload replaces the previous object.
pub fn resume_key(email: &str) -> String {
    format!("resumes/{}_resume", email_key(email))
}

/// Storage key for a company logo.
pub fn logo_key(email: &str) -> String {
    format!("company_logos/{}_logo", email_key(email))
}

/// Distinct emails always map to distinct keys. ASCII letters, digits, `.` and
/// `-` pass through, `@` becomes `_at_`, and every other byte becomes `_XX`
/// (uppercase hex). A raw `_` never survives, so every `_` starts an escape.
fn email_key(email: &str) -> String {
    let mut key = String::with_capacity(email.len() + 8);
    for byte in email.bytes() {
        match byte {
            b'@' => key.push_str("_at_"),
            b if b.is_ascii_alphanumeric() || b == b'.' || b == b'-' => key.push(b as char),
            b => key.push_str(&format!("_{b:02X}")),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_is_deterministic() {
        assert_eq!(resume_key("a@x.com"), "resumes/a_at_x.com_resume");
        assert_eq!(resume_key("a@x.com"), resume_key("a@x.com"));
    }

    #[test]
    fn test_case_variants_get_separate_keys() {
        assert_ne!(resume_key("A@X.com"), resume_key("a@x.com"));
        assert_ne!(logo_key("HR@acme.io"), logo_key("hr@acme.io"));
    }

    #[test]
    fn test_escaped_characters_do_not_collide() {
        let keys = [
            resume_key("a+b@x.com"),
            resume_key("a_b@x.com"),
            resume_key("a b@x.com"),
            resume_key("a_2Bb@x.com"),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(resume_key("a+b@x.com"), "resumes/a_2Bb_at_x.com_resume");
        assert_eq!(resume_key("a_b@x.com"), "resumes/a_5Fb_at_x.com_resume");
    }

    #[test]
    fn test_email_key_escapes_path_characters() {
        assert_eq!(
            resume_key("../evil/@x.com"),
            "resumes/.._2Fevil_2F_at_x.com_resume"
        );
    }

    #[test]
    fn test_logo_key_has_own_prefix() {
        assert_eq!(logo_key("hr@acme.io"), "company_logos/hr_at_acme.io_logo");
    }
}
