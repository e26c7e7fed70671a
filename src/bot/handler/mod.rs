pub mod member;
pub mod ready;
