//! Role-tagged messages exchanged with the completion endpoint.
//!
//! - [`entities::Role`]: `system`, `user` or `assistant`
//! - [`entities::Message`]: one role-tagged content entry

pub mod entities;
