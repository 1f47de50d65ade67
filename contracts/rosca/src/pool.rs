use soroban_sdk::{Address, Env, String, Vec};

use crate::config;
use crate::errors::ContractError;
use crate::events::{self, CycleAdvancedEvent, MemberJoinedEvent, Notification, PoolFullNotice};
use crate::payout;
use crate::reputation;
use crate::storage;
use crate::types::{
    MemberStatus, Pool, PoolMember, PoolSettings, PoolStatus, ReputationEventType,
    MONTHLY_CADENCE, WEEKLY_CADENCE,
};

pub const MAX_TEMPLATES: u32 = 10;

fn validate_settings(env: &Env, settings: &PoolSettings) -> Result<(), ContractError> {
    let config = config::get_config(env);
    if settings.size < config.min_pool_size || settings.size > config.max_pool_size {
        return Err(ContractError::InvalidParameters);
    }
    if settings.contribution_amount <= 0 {
        return Err(ContractError::InvalidParameters);
    }
    pot_amount(settings.contribution_amount, settings.size)?;
    if settings.cadence_seconds != WEEKLY_CADENCE && settings.cadence_seconds != MONTHLY_CADENCE {
        return Err(ContractError::InvalidParameters);
    }
    Ok(())
}

/// What one cycle collects and pays out: `contribution_amount * size`.
pub fn pot_amount(contribution_amount: i128, size: u32) -> Result<i128, ContractError> {
    contribution_amount
        .checked_mul(size as i128)
        .ok_or(ContractError::InvalidParameters)
}

pub fn load_pool(env: &Env, pool_id: u64) -> Result<Pool, ContractError> {
    storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)
}

fn enrol(env: &Env, pool: &mut Pool, user: &Address) -> PoolMember {
    let member = PoolMember {
        pool_id: pool.id,
        user: user.clone(),
        payout_position: pool.members.len(),
        has_received_payout: false,
        reputation_snapshot: reputation::current_score(env, user),
        status: MemberStatus::Active,
        joined_at: env.ledger().timestamp(),
    };

    pool.members.push_back(user.clone());
    storage::set_member(env, &member);
    storage::set_position_holder(env, pool.id, member.payout_position, user);
    storage::add_member_pool(env, user, pool.id);

    events::publish_member_joined(
        env,
        MemberJoinedEvent {
            pool_id: pool.id,
            user: user.clone(),
            payout_position: member.payout_position,
            reputation_snapshot: member.reputation_snapshot,
        },
    );

    member
}

pub fn create_pool(
    env: &Env,
    creator: Address,
    settings: PoolSettings,
) -> Result<u64, ContractError> {
    creator.require_auth();
    validate_settings(env, &settings)?;

    let pool_id = storage::get_pool_counter(env) + 1;
    storage::set_pool_counter(env, pool_id);

    let mut pool = Pool {
        id: pool_id,
        creator: creator.clone(),
        name: settings.name,
        token: settings.token,
        size: settings.size,
        contribution_amount: settings.contribution_amount,
        cadence_seconds: settings.cadence_seconds,
        payout_mode: settings.payout_mode,
        stake_enabled: settings.stake_enabled,
        default_fund_enabled: settings.default_fund_enabled,
        status: PoolStatus::Pending,
        current_cycle: 0,
        next_cycle_time: None,
        paused_at: None,
        members: Vec::new(env),
        created_at: env.ledger().timestamp(),
    };

    events::publish_pool_created(env, pool_id, &creator);
    enrol(env, &mut pool, &creator);
    storage::set_pool(env, &pool);

    Ok(pool_id)
}

pub fn join_pool(env: &Env, user: Address, pool_id: u64) -> Result<PoolMember, ContractError> {
    user.require_auth();

    let mut pool = load_pool(env, pool_id)?;

    if pool.status != PoolStatus::Pending || pool.members.len() >= pool.size {
        return Err(ContractError::PoolNotJoinable);
    }
    if storage::has_member(env, pool_id, &user) {
        return Err(ContractError::AlreadyMember);
    }

    let mut member = enrol(env, &mut pool, &user);

    if pool.members.len() == pool.size {
        activate(env, &mut pool);
        // Random mode may have moved the joiner.
        member = storage::get_member(env, pool_id, &user).unwrap_or(member);
    }
    storage::set_pool(env, &pool);

    Ok(member)
}

/// Starts cycle 0 on a full roster and fixes the payout order.
fn activate(env: &Env, pool: &mut Pool) {
    let first_deadline = env.ledger().timestamp() + pool.cadence_seconds;
    pool.status = PoolStatus::Active;
    pool.current_cycle = 0;
    pool.next_cycle_time = Some(first_deadline);

    payout::assign_positions(env, pool);

    events::publish_pool_activated(env, pool.id);
    for user in pool.members.iter() {
        if let Some(member) = storage::get_member(env, pool.id, &user) {
            events::notify(
                env,
                &user,
                Notification::PoolFull(PoolFullNotice {
                    pool_id: pool.id,
                    first_deadline,
                    payout_position: member.payout_position,
                }),
            );
        }
    }
}

/// Moves to the next cycle after a payout. Reaching `size` completes the pool
/// and credits every member still in good standing.
pub fn advance_cycle(env: &Env, pool: &mut Pool) -> Result<(), ContractError> {
    pool.current_cycle += 1;
    let next_cycle_time = env.ledger().timestamp() + pool.cadence_seconds;
    pool.next_cycle_time = Some(next_cycle_time);

    if pool.current_cycle < pool.size {
        events::publish_cycle_advanced(
            env,
            CycleAdvancedEvent {
                pool_id: pool.id,
                cycle: pool.current_cycle,
                next_cycle_time,
            },
        );
        return Ok(());
    }

    pool.status = PoolStatus::Completed;
    pool.next_cycle_time = None;
    for user in pool.members.iter() {
        let member = storage::get_member(env, pool.id, &user).ok_or(ContractError::NotMember)?;
        if member.status != MemberStatus::Active {
            continue;
        }
        reputation::apply_event(
            env,
            &user,
            Some(pool.id),
            ReputationEventType::PoolCompleted,
            None,
            None,
        )?;
    }
    events::publish_pool_completed(env, pool.id);

    Ok(())
}

pub fn get_pool(env: &Env, pool_id: u64) -> Result<Pool, ContractError> {
    load_pool(env, pool_id)
}

pub fn get_member(env: &Env, pool_id: u64, user: Address) -> Result<PoolMember, ContractError> {
    load_pool(env, pool_id)?;
    storage::get_member(env, pool_id, &user).ok_or(ContractError::NotMember)
}

pub fn get_members(env: &Env, pool_id: u64) -> Result<Vec<PoolMember>, ContractError> {
    let pool = load_pool(env, pool_id)?;
    let mut members = Vec::new(env);
    for user in pool.members.iter() {
        if let Some(member) = storage::get_member(env, pool_id, &user) {
            members.push_back(member);
        }
    }
    Ok(members)
}

pub fn get_member_pools(env: &Env, user: Address) -> Vec<u64> {
    storage::get_member_pools(env, &user)
}

// --- Templates ---

pub fn save_template(
    env: &Env,
    creator: Address,
    settings: PoolSettings,
) -> Result<u32, ContractError> {
    creator.require_auth();
    validate_settings(env, &settings)?;

    let count = storage::get_template_counter(env, &creator);
    if count >= MAX_TEMPLATES {
        return Err(ContractError::TemplateLimitReached);
    }

    let template_id = count + 1;
    storage::set_template(env, &creator, template_id, &settings);
    storage::set_template_counter(env, &creator, template_id);

    Ok(template_id)
}

pub fn get_template(
    env: &Env,
    creator: Address,
    template_id: u32,
) -> Result<PoolSettings, ContractError> {
    storage::get_template(env, &creator, template_id).ok_or(ContractError::TemplateNotFound)
}

pub fn create_from_template(
    env: &Env,
    creator: Address,
    template_id: u32,
    name: String,
) -> Result<u64, ContractError> {
    let mut settings = get_template(env, creator.clone(), template_id)?;
    settings.name = name;
    create_pool(env, creator, settings)
}
