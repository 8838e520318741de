//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: completion model identifiers
//! - [`inquiry::Inquiry`]: validated text submitted by the inquirer
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod inquiry;
pub mod model;
