//! Discord bot integration: the roster provider's data source.
//!
//! The gateway client serves two purposes: its HTTP handle is what the roster
//! sync scheduler uses to fetch member snapshots, and its member-update events
//! keep user identity (username, display name, clan tag) fresh between sync
//! cycles. Command handling and presentation live with external consumers of
//! the REST API, not here.
//!
//! The bot is initialized during startup and runs in a separate tokio task.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive events about guild availability
//! - `GUILD_MEMBERS` - Receive events about guild member changes (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
