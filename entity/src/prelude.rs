pub use super::afk_window::Entity as AfkWindow;
pub use super::clan_membership::Entity as ClanMembership;
pub use super::user::Entity as User;
