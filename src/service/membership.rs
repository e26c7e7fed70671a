//! Membership reconciliation engine.
//!
//! Keeps membership interval rows consistent with an externally observed
//! roster, producing a join/leave audit trail. Reconciliation passes for the
//! same clan are serialized by a keyed lock (concurrent diffs against the same
//! active-interval set could double-open or double-close); passes for
//! different clans run concurrently. All opens and closes of one pass commit
//! together, so a partial failure never applies some joins without the rest.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{membership::ClanMembershipRepository, user::UserRepository},
    error::{membership::MembershipError, AppError},
    model::{
        membership::{
            AddMemberParam, ClanMembership, MembershipHistoryFilter, RosterDiff, RosterMember,
        },
        user::{UpsertUserParam, User},
    },
    util::lock::KeyedLocks,
};

/// Service implementing the membership reconciliation rules.
pub struct MembershipService<'a> {
    db: &'a DatabaseConnection,
    locks: KeyedLocks,
}

impl<'a> MembershipService<'a> {
    /// Creates a new service instance.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `locks` - Shared per-clan lock registry serializing reconciliation
    pub fn new(db: &'a DatabaseConnection, locks: KeyedLocks) -> Self {
        Self { db, locks }
    }

    /// Reconciles a clan's stored intervals against a roster snapshot.
    ///
    /// Members in the snapshot without an active interval get one opened
    /// (creating their user row on first sight); active intervals whose member
    /// is absent from the snapshot are closed; members present in both sets
    /// are untouched. Calling twice with the same snapshot changes nothing the
    /// second time.
    ///
    /// # Arguments
    /// - `clan_role_id` - Clan whose roster was observed
    /// - `roster` - The clan's current members as seen by the roster provider
    ///
    /// # Returns
    /// - `Ok(RosterDiff)` - Discord IDs that joined and left this pass
    /// - `Err(AppError)` - Database error; no changes of this pass are applied
    pub async fn reconcile(
        &self,
        clan_role_id: &str,
        roster: &[RosterMember],
    ) -> Result<RosterDiff, AppError> {
        let lock = self.locks.get(clan_role_id);
        let _guard = lock.lock().await;

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let membership_repo = ClanMembershipRepository::new(&txn);
        let user_repo = UserRepository::new(&txn);

        let active = membership_repo.active_for_clan(clan_role_id).await?;
        let active_by_user: HashMap<u64, &ClanMembership> =
            active.iter().map(|m| (m.user_id, m)).collect();

        // Dedupe the snapshot; at-least-once delivery may repeat ids
        let mut seen: HashMap<u64, &RosterMember> = HashMap::new();
        for member in roster {
            seen.entry(member.discord_id).or_insert(member);
        }

        let mut diff = RosterDiff::default();

        for (discord_id, member) in &seen {
            if active_by_user.contains_key(discord_id) {
                continue;
            }

            user_repo
                .upsert(UpsertUserParam {
                    discord_id: *discord_id,
                    username: member.username.clone(),
                    display_name: member.display_name.clone(),
                    clan_role_id: Some(clan_role_id.to_string()),
                })
                .await?;
            membership_repo.open(*discord_id, clan_role_id, now).await?;
            diff.joined.push(*discord_id);
        }

        for (user_id, interval) in &active_by_user {
            if seen.contains_key(user_id) {
                continue;
            }

            membership_repo.close(interval.id, now).await?;
            diff.left.push(*user_id);
        }

        txn.commit().await?;

        Ok(diff)
    }

    /// Explicitly adds a member to a clan.
    ///
    /// Manual counterpart to automatic reconciliation. Must not silently
    /// no-op: an existing active interval for the pair is an error, which is
    /// what protects the audit trail from duplicate opens.
    ///
    /// # Arguments
    /// - `param` - Member identity and target clan
    ///
    /// # Returns
    /// - `Ok(ClanMembership)` - The opened interval
    /// - `Err(AppError::MembershipErr(AlreadyMember))` - An active interval exists
    /// - `Err(AppError)` - Database error
    pub async fn add_member(&self, param: AddMemberParam) -> Result<ClanMembership, AppError> {
        let lock = self.locks.get(&param.clan_role_id);
        let _guard = lock.lock().await;

        let txn = self.db.begin().await?;

        let membership_repo = ClanMembershipRepository::new(&txn);

        if membership_repo
            .find_active(param.discord_id, &param.clan_role_id)
            .await?
            .is_some()
        {
            return Err(MembershipError::AlreadyMember {
                user_id: param.discord_id,
                clan_role_id: param.clan_role_id,
            }
            .into());
        }

        UserRepository::new(&txn)
            .upsert(UpsertUserParam {
                discord_id: param.discord_id,
                username: param.username,
                display_name: param.display_name,
                clan_role_id: Some(param.clan_role_id.clone()),
            })
            .await?;

        let membership = membership_repo
            .open(param.discord_id, &param.clan_role_id, Utc::now())
            .await?;

        txn.commit().await?;

        Ok(membership)
    }

    /// Explicitly removes a member from a clan.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the member to remove
    /// - `clan_role_id` - Clan to remove them from
    ///
    /// # Returns
    /// - `Ok(ClanMembership)` - The closed interval, `left_at` stamped
    /// - `Err(AppError::MembershipErr(NotMember))` - No active interval exists
    /// - `Err(AppError)` - Database error
    pub async fn remove_member(
        &self,
        discord_id: u64,
        clan_role_id: &str,
    ) -> Result<ClanMembership, AppError> {
        let lock = self.locks.get(clan_role_id);
        let _guard = lock.lock().await;

        let repo = ClanMembershipRepository::new(self.db);

        let Some(interval) = repo.find_active(discord_id, clan_role_id).await? else {
            return Err(MembershipError::NotMember {
                user_id: discord_id,
                clan_role_id: clan_role_id.to_string(),
            }
            .into());
        };

        repo.close(interval.id, Utc::now()).await?;

        match repo.find_by_id(interval.id).await? {
            Some(closed) => Ok(closed),
            None => Err(MembershipError::NotMember {
                user_id: discord_id,
                clan_role_id: clan_role_id.to_string(),
            }
            .into()),
        }
    }

    /// Lists a clan's current members with their active intervals.
    pub async fn members(&self, clan_role_id: &str) -> Result<Vec<(User, ClanMembership)>, AppError> {
        ClanMembershipRepository::new(self.db)
            .active_members_with_users(clan_role_id)
            .await
    }

    /// Queries membership history, most recent `joined_at` first.
    ///
    /// Serves both "show a user's clan history" and "show recent joins/leaves
    /// across a clan in the last N days".
    ///
    /// # Arguments
    /// - `filter` - User, clan, date-range and active-only restrictions
    pub async fn history(
        &self,
        filter: &MembershipHistoryFilter,
    ) -> Result<Vec<ClanMembership>, AppError> {
        ClanMembershipRepository::new(self.db).history(filter).await
    }
}
