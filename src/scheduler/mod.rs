//! Cron jobs for automated background work.
//!
//! Two independent timers drive the engines:
//! - the AFK activation sweep recomputes the cached `is_active` flag every
//!   minute (nothing else observes bare clock advance);
//! - the roster sync fetches each configured clan's Discord members every
//!   minute and reconciles the membership ledger against the snapshot.
//!
//! Job failures are logged and retried on the next cycle; nothing is retried
//! inside the jobs themselves.

pub mod afk_sweep;
pub mod roster_sync;
