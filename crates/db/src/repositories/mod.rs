//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool`, or `&mut PgConnection` when they must join a caller's
//! transaction.

pub mod category_repo;
pub mod memo_repo;
pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use memo_repo::MemoRepo;
pub use post_repo::PostRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
