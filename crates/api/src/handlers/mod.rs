pub mod auth;
pub mod categories;
pub mod memos;
pub mod posts;
pub mod tags;
