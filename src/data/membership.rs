//! Clan membership repository for database operations.
//!
//! This module provides the `ClanMembershipRepository` for managing membership
//! interval rows. Intervals are opened when a user is observed in a clan roster
//! without an active interval and closed when they disappear from it; a member
//! who leaves and rejoins produces two distinct rows, preserving the join/leave
//! audit trail.
//!
//! All methods return domain models at the repository boundary, converting SeaORM
//! entity models internally to prevent database-specific structures from leaking
//! into service and controller layers.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    error::{internal::InternalError, AppError},
    model::{
        membership::{ClanMembership, MembershipHistoryFilter},
        user::User,
    },
};

/// Repository for clan membership interval database operations.
pub struct ClanMembershipRepository<'a, C> {
    /// Database connection or open transaction for executing queries.
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClanMembershipRepository<'a, C> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds an interval by id.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the interval
    ///
    /// # Returns
    /// - `Ok(Some(ClanMembership))` - Interval found
    /// - `Ok(None)` - No interval with that id
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ClanMembership>, AppError> {
        let entity = entity::prelude::ClanMembership::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(ClanMembership::from_entity).transpose()
    }

    /// Finds the active interval for a (user, clan) pair, if one exists.
    ///
    /// At most one interval per pair may be active at a time.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `clan_role_id` - Clan role id
    ///
    /// # Returns
    /// - `Ok(Some(ClanMembership))` - The pair's active interval
    /// - `Ok(None)` - The user is not currently a member of the clan
    /// - `Err(AppError)` - Database error during query
    pub async fn find_active(
        &self,
        user_id: u64,
        clan_role_id: &str,
    ) -> Result<Option<ClanMembership>, AppError> {
        let entity = entity::prelude::ClanMembership::find()
            .filter(entity::clan_membership::Column::UserId.eq(user_id.to_string()))
            .filter(entity::clan_membership::Column::ClanRoleId.eq(clan_role_id))
            .filter(entity::clan_membership::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        entity.map(ClanMembership::from_entity).transpose()
    }

    /// Lists all currently-active intervals for a clan.
    ///
    /// This is the stored side of the reconciliation diff.
    ///
    /// # Arguments
    /// - `clan_role_id` - Clan role id
    ///
    /// # Returns
    /// - `Ok(Vec<ClanMembership>)` - Active intervals for the clan
    /// - `Err(AppError)` - Database error during query
    pub async fn active_for_clan(
        &self,
        clan_role_id: &str,
    ) -> Result<Vec<ClanMembership>, AppError> {
        let rows = entity::prelude::ClanMembership::find()
            .filter(entity::clan_membership::Column::ClanRoleId.eq(clan_role_id))
            .filter(entity::clan_membership::Column::IsActive.eq(true))
            .all(self.db)
            .await?;

        rows.into_iter().map(ClanMembership::from_entity).collect()
    }

    /// Lists a clan's active intervals joined with their member user rows.
    ///
    /// # Arguments
    /// - `clan_role_id` - Clan role id
    ///
    /// # Returns
    /// - `Ok(Vec<(User, ClanMembership)>)` - Members ordered by username
    /// - `Err(AppError)` - Database error during query
    pub async fn active_members_with_users(
        &self,
        clan_role_id: &str,
    ) -> Result<Vec<(User, ClanMembership)>, AppError> {
        let rows = entity::prelude::ClanMembership::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::clan_membership::Column::ClanRoleId.eq(clan_role_id))
            .filter(entity::clan_membership::Column::IsActive.eq(true))
            .order_by_asc(entity::user::Column::Username)
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(membership, user)| {
                let Some(user) = user else {
                    return Err(InternalError::MissingJoinedUser {
                        user_id: membership.user_id.clone(),
                    }
                    .into());
                };

                Ok((
                    User::from_entity(user)?,
                    ClanMembership::from_entity(membership)?,
                ))
            })
            .collect()
    }

    /// Opens a new interval for a (user, clan) pair.
    ///
    /// The caller has already verified no active interval exists for the pair.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `clan_role_id` - Clan role id
    /// - `now` - Join instant to stamp
    ///
    /// # Returns
    /// - `Ok(ClanMembership)` - The opened interval
    /// - `Err(AppError)` - Database error during insert
    pub async fn open(
        &self,
        user_id: u64,
        clan_role_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ClanMembership, AppError> {
        let entity =
            entity::prelude::ClanMembership::insert(entity::clan_membership::ActiveModel {
                user_id: ActiveValue::Set(user_id.to_string()),
                clan_role_id: ActiveValue::Set(clan_role_id.to_string()),
                joined_at: ActiveValue::Set(now),
                left_at: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?;

        ClanMembership::from_entity(entity)
    }

    /// Closes an interval: clears the active flag and stamps `left_at`.
    ///
    /// Only still-active rows are touched, so closing twice affects nothing
    /// the second time.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the interval
    /// - `now` - Leave instant to stamp
    ///
    /// # Returns
    /// - `Ok(u64)` - 1 when the interval was closed, 0 if it already was
    /// - `Err(AppError)` - Database error during the update
    pub async fn close(&self, id: i32, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::ClanMembership::update_many()
            .filter(entity::clan_membership::Column::Id.eq(id))
            .filter(entity::clan_membership::Column::IsActive.eq(true))
            .col_expr(
                entity::clan_membership::Column::IsActive,
                Expr::value(false),
            )
            .col_expr(entity::clan_membership::Column::LeftAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Queries membership history, most recent `joined_at` first.
    ///
    /// When the filter carries a date range, intervals qualify if their
    /// `joined_at` or `left_at` falls inside it.
    ///
    /// # Arguments
    /// - `filter` - User, clan, date-range and active-only restrictions
    ///
    /// # Returns
    /// - `Ok(Vec<ClanMembership>)` - Matching intervals, newest join first
    /// - `Err(AppError)` - Database error during query
    pub async fn history(
        &self,
        filter: &MembershipHistoryFilter,
    ) -> Result<Vec<ClanMembership>, AppError> {
        let mut query = entity::prelude::ClanMembership::find();

        if let Some(discord_id) = filter.discord_id {
            query = query
                .filter(entity::clan_membership::Column::UserId.eq(discord_id.to_string()));
        }
        if let Some(clan_role_id) = &filter.clan_role_id {
            query = query.filter(entity::clan_membership::Column::ClanRoleId.eq(clan_role_id));
        }
        if !filter.include_inactive {
            query = query.filter(entity::clan_membership::Column::IsActive.eq(true));
        }

        if filter.since.is_some() || filter.until.is_some() {
            let mut joined_in_range = Condition::all();
            let mut left_in_range = Condition::all();

            if let Some(since) = filter.since {
                joined_in_range =
                    joined_in_range.add(entity::clan_membership::Column::JoinedAt.gte(since));
                left_in_range =
                    left_in_range.add(entity::clan_membership::Column::LeftAt.gte(since));
            }
            if let Some(until) = filter.until {
                joined_in_range =
                    joined_in_range.add(entity::clan_membership::Column::JoinedAt.lte(until));
                left_in_range =
                    left_in_range.add(entity::clan_membership::Column::LeftAt.lte(until));
            }

            query = query.filter(Condition::any().add(joined_in_range).add(left_in_range));
        }

        let rows = query
            .order_by_desc(entity::clan_membership::Column::JoinedAt)
            .all(self.db)
            .await?;

        rows.into_iter().map(ClanMembership::from_entity).collect()
    }
}
