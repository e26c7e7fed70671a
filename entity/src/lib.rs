pub mod afk_window;
pub mod clan_membership;
pub mod prelude;
pub mod user;
