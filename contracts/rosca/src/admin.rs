use soroban_sdk::{symbol_short, Address, Env, String};

use crate::config;
use crate::errors::ContractError;
use crate::events::{self, DefaultWarningNotice, MemberJoinedEvent, Notification};
use crate::pool;
use crate::reputation;
use crate::storage;
use crate::types::{
    Dispute, DisputeKind, DisputeStatus, MemberStatus, Pool, PoolMember, PoolStatus,
    ReputationEventType,
};

/// Pool creator or protocol admin.
pub fn require_pool_admin(env: &Env, caller: &Address, pool: &Pool) -> Result<(), ContractError> {
    if *caller == pool.creator {
        return Ok(());
    }
    config::require_protocol_admin(env, caller)
}

pub fn pause_pool(env: &Env, caller: Address, pool_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut pool = pool::load_pool(env, pool_id)?;
    require_pool_admin(env, &caller, &pool)?;

    if pool.status != PoolStatus::Pending && pool.status != PoolStatus::Active {
        return Err(ContractError::PoolNotActive);
    }

    pool.status = PoolStatus::Paused;
    pool.paused_at = Some(env.ledger().timestamp());
    storage::set_pool(env, &pool);

    events::publish_status_change(env, symbol_short!("paused"), pool_id);

    Ok(())
}

/// Resumes a paused pool: `Active` when the roster is full, else `Pending`.
/// The cycle deadline moves back by however long the pool was paused.
pub fn resume_pool(env: &Env, caller: Address, pool_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut pool = pool::load_pool(env, pool_id)?;
    require_pool_admin(env, &caller, &pool)?;

    if pool.status != PoolStatus::Paused {
        return Err(ContractError::PoolNotActive);
    }

    pool.status = if pool.members.len() == pool.size {
        PoolStatus::Active
    } else {
        PoolStatus::Pending
    };
    if let (Some(paused_at), Some(deadline)) = (pool.paused_at, pool.next_cycle_time) {
        let paused_for = env.ledger().timestamp().saturating_sub(paused_at);
        pool.next_cycle_time = Some(deadline + paused_for);
    }
    pool.paused_at = None;
    storage::set_pool(env, &pool);

    events::publish_status_change(env, symbol_short!("resumed"), pool_id);

    Ok(())
}

fn require_running(pool: &Pool) -> Result<(), ContractError> {
    match pool.status {
        PoolStatus::Active | PoolStatus::Paused if pool.next_cycle_time.is_some() => Ok(()),
        _ => Err(ContractError::PoolNotActive),
    }
}

/// Marks a member who let the current cycle's deadline pass unpaid as
/// defaulted.
pub fn record_default(
    env: &Env,
    caller: Address,
    pool_id: u64,
    user: Address,
) -> Result<(), ContractError> {
    caller.require_auth();

    let pool = pool::load_pool(env, pool_id)?;
    require_pool_admin(env, &caller, &pool)?;

    // No defaults while paused.
    let deadline = match (pool.status, pool.next_cycle_time) {
        (PoolStatus::Active, Some(deadline)) => deadline,
        _ => return Err(ContractError::PoolNotActive),
    };
    if env.ledger().timestamp() <= deadline {
        return Err(ContractError::DeadlineNotReached);
    }

    let mut member = storage::get_member(env, pool_id, &user).ok_or(ContractError::NotMember)?;
    if member.status != MemberStatus::Active {
        return Err(ContractError::NotMember);
    }
    if storage::has_contribution(env, pool_id, pool.current_cycle, &user) {
        return Err(ContractError::DuplicateContribution);
    }

    member.status = MemberStatus::Defaulted;
    storage::set_member(env, &member);

    reputation::apply_event(
        env,
        &user,
        Some(pool_id),
        ReputationEventType::Default,
        None,
        None,
    )?;

    events::publish_status_change(env, symbol_short!("default"), pool_id);
    events::notify(
        env,
        &user,
        Notification::DefaultWarning(DefaultWarningNotice {
            pool_id,
            cycle: pool.current_cycle,
            reputation_score: reputation::current_score(env, &user),
        }),
    );

    Ok(())
}

/// Hands a defaulted member's payout position and roster slot to a new user.
pub fn replace_member(
    env: &Env,
    caller: Address,
    pool_id: u64,
    old: Address,
    new: Address,
) -> Result<PoolMember, ContractError> {
    caller.require_auth();
    new.require_auth();

    let mut pool = pool::load_pool(env, pool_id)?;
    require_pool_admin(env, &caller, &pool)?;
    require_running(&pool)?;

    let mut old_member =
        storage::get_member(env, pool_id, &old).ok_or(ContractError::NotMember)?;
    if old_member.status != MemberStatus::Defaulted {
        return Err(ContractError::MemberNotDefaulted);
    }
    if storage::has_member(env, pool_id, &new) {
        return Err(ContractError::AlreadyMember);
    }

    let slot = pool
        .members
        .first_index_of(old.clone())
        .ok_or(ContractError::NotMember)?;

    let new_member = PoolMember {
        pool_id,
        user: new.clone(),
        payout_position: old_member.payout_position,
        has_received_payout: old_member.has_received_payout,
        reputation_snapshot: reputation::current_score(env, &new),
        status: MemberStatus::Active,
        joined_at: env.ledger().timestamp(),
    };

    old_member.status = MemberStatus::Replaced;
    storage::set_member(env, &old_member);
    storage::set_member(env, &new_member);
    storage::set_position_holder(env, pool_id, new_member.payout_position, &new);
    storage::add_member_pool(env, &new, pool_id);

    pool.members.set(slot, new.clone());
    storage::set_pool(env, &pool);

    events::publish_member_joined(
        env,
        MemberJoinedEvent {
            pool_id,
            user: new,
            payout_position: new_member.payout_position,
            reputation_snapshot: new_member.reputation_snapshot,
        },
    );

    Ok(new_member)
}

// --- Disputes ---

pub fn raise_dispute(
    env: &Env,
    user: Address,
    pool_id: u64,
    against: Option<Address>,
    kind: DisputeKind,
    description: String,
) -> Result<u32, ContractError> {
    user.require_auth();

    pool::load_pool(env, pool_id)?;
    if !storage::has_member(env, pool_id, &user) {
        return Err(ContractError::NotMember);
    }
    if let Some(target) = &against {
        if !storage::has_member(env, pool_id, target) {
            return Err(ContractError::NotMember);
        }
    }

    let dispute_id = storage::get_dispute_counter(env, pool_id) + 1;
    storage::set_dispute_counter(env, pool_id, dispute_id);

    let dispute = Dispute {
        id: dispute_id,
        pool_id,
        raised_by: user.clone(),
        against,
        kind,
        description,
        status: DisputeStatus::Open,
        raised_at: env.ledger().timestamp(),
    };
    storage::set_dispute(env, &dispute);

    env.events()
        .publish((symbol_short!("dispute"),), (pool_id, dispute_id, user));

    Ok(dispute_id)
}

pub fn resolve_dispute(
    env: &Env,
    caller: Address,
    pool_id: u64,
    dispute_id: u32,
) -> Result<(), ContractError> {
    caller.require_auth();

    let pool = pool::load_pool(env, pool_id)?;
    require_pool_admin(env, &caller, &pool)?;

    let mut dispute =
        storage::get_dispute(env, pool_id, dispute_id).ok_or(ContractError::DisputeNotFound)?;
    if dispute.status != DisputeStatus::Open {
        return Err(ContractError::DisputeClosed);
    }

    dispute.status = DisputeStatus::Resolved;
    storage::set_dispute(env, &dispute);

    env.events()
        .publish((symbol_short!("resolved"),), (pool_id, dispute_id));

    Ok(())
}

pub fn get_dispute(env: &Env, pool_id: u64, dispute_id: u32) -> Result<Dispute, ContractError> {
    storage::get_dispute(env, pool_id, dispute_id).ok_or(ContractError::DisputeNotFound)
}
