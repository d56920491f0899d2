pub mod category;
pub mod memo;
pub mod post;
pub mod tag;
pub mod user;
