//! Domain logic shared by the Quill database and API layers.
//!
//! Nothing in this crate performs I/O. It holds the id/timestamp aliases,
//! the domain error type, role names, slug derivation, pagination rules and
//! the input rules used by request validation.

pub mod content;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod rules;
pub mod slug;
pub mod types;
