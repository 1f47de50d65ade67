use soroban_sdk::{Address, Env, Vec};

use crate::config::POOL_SIZE_CEILING;
use crate::contribution;
use crate::errors::ContractError;
use crate::events;
use crate::funds;
use crate::pool;
use crate::storage;
use crate::types::{MemberStatus, Payout, PayoutMode, Pool, PoolStatus};

/// Fixes the payout order when a pool activates. Fixed mode keeps join order;
/// random mode draws one permutation of `[0, size)` and never redraws it.
pub fn assign_positions(env: &Env, pool: &Pool) {
    if pool.payout_mode == PayoutMode::Fixed {
        return;
    }

    let len = pool.members.len() as usize;
    let mut positions = [0u32; POOL_SIZE_CEILING as usize];
    for (i, slot) in positions.iter_mut().enumerate().take(len) {
        *slot = i as u32;
    }
    for i in (1..len).rev() {
        let j = env.prng().gen_range::<u64>(0..=i as u64) as usize;
        positions.swap(i, j);
    }

    for (i, user) in pool.members.iter().enumerate() {
        if let Some(mut member) = storage::get_member(env, pool.id, &user) {
            member.payout_position = positions[i];
            storage::set_member(env, &member);
            storage::set_position_holder(env, pool.id, member.payout_position, &user);
        }
    }
}

pub fn recipient_for(env: &Env, pool_id: u64, cycle: u32) -> Result<Address, ContractError> {
    pool::load_pool(env, pool_id)?;

    let holder = storage::get_position_holder(env, pool_id, cycle)
        .ok_or(ContractError::RecipientNotFound)?;
    let member =
        storage::get_member(env, pool_id, &holder).ok_or(ContractError::RecipientNotFound)?;

    // A defaulted slot stays unpaid until the member is replaced.
    if member.status != MemberStatus::Active {
        return Err(ContractError::RecipientNotFound);
    }

    Ok(holder)
}

/// Pays the current cycle's recipient. Anyone can call this once every member
/// has contributed; the payout row, the recipient flag, the cycle advance and
/// the transfer all commit together or not at all.
pub fn trigger_payout(env: &Env, pool_id: u64) -> Result<Payout, ContractError> {
    let mut pool = pool::load_pool(env, pool_id)?;

    if pool.status != PoolStatus::Active {
        return Err(ContractError::PayoutNotReady);
    }

    let cycle = pool.current_cycle;
    if storage::has_payout(env, pool_id, cycle) {
        return Err(ContractError::PayoutNotReady);
    }
    if !contribution::all_contributed(env, pool_id, cycle)? {
        return Err(ContractError::PayoutNotReady);
    }

    let recipient = recipient_for(env, pool_id, cycle)?;

    let base_amount = pool::pot_amount(pool.contribution_amount, pool.size)?;
    // Staking yield is not realised by this contract.
    let yield_amount = 0;

    let payout = Payout {
        pool_id,
        cycle,
        recipient: recipient.clone(),
        base_amount,
        yield_amount,
        total_amount: base_amount + yield_amount,
        ledger: env.ledger().sequence(),
        paid_at: env.ledger().timestamp(),
    };
    storage::set_payout(env, &payout);

    let mut member =
        storage::get_member(env, pool_id, &recipient).ok_or(ContractError::RecipientNotFound)?;
    member.has_received_payout = true;
    storage::set_member(env, &member);

    pool::advance_cycle(env, &mut pool)?;
    storage::set_pool(env, &pool);

    funds::transfer(
        env,
        &pool.token,
        &env.current_contract_address(),
        &recipient,
        payout.total_amount,
    )?;

    events::publish_payout(env, &payout);

    Ok(payout)
}

pub fn get_payout(env: &Env, pool_id: u64, cycle: u32) -> Option<Payout> {
    storage::get_payout(env, pool_id, cycle)
}

pub fn get_payout_order(env: &Env, pool_id: u64) -> Result<Vec<Address>, ContractError> {
    let pool = pool::load_pool(env, pool_id)?;
    let mut order = Vec::new(env);
    for position in 0..pool.size {
        if let Some(holder) = storage::get_position_holder(env, pool_id, position) {
            order.push_back(holder);
        }
    }
    Ok(order)
}

pub fn get_current_recipient(env: &Env, pool_id: u64) -> Result<Address, ContractError> {
    let pool = pool::load_pool(env, pool_id)?;

    if pool.status != PoolStatus::Active {
        return Err(ContractError::PoolNotActive);
    }

    recipient_for(env, pool_id, pool.current_cycle)
}
