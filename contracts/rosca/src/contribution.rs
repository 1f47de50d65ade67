use soroban_sdk::{Address, Env};

use crate::admin;
use crate::errors::ContractError;
use crate::events::{
    self, ContributionEvent, ContributionReminderNotice, LatePaymentNotice, Notification,
    PayoutReadyNotice,
};
use crate::funds;
use crate::payout;
use crate::pool;
use crate::reputation;
use crate::storage;
use crate::types::{Contribution, MemberStatus, PoolStatus, ReputationEventType};

pub fn record_contribution(
    env: &Env,
    user: Address,
    pool_id: u64,
    cycle: u32,
) -> Result<Contribution, ContractError> {
    user.require_auth();

    let pool = pool::load_pool(env, pool_id)?;

    if pool.status != PoolStatus::Active {
        return Err(ContractError::PoolNotActive);
    }

    // Verify membership
    let member = storage::get_member(env, pool_id, &user).ok_or(ContractError::NotMember)?;
    if member.status != MemberStatus::Active {
        return Err(ContractError::NotMember);
    }

    if cycle != pool.current_cycle {
        return Err(ContractError::WrongCycle);
    }

    if storage::has_contribution(env, pool_id, cycle, &user) {
        return Err(ContractError::DuplicateContribution);
    }

    let now = env.ledger().timestamp();
    let deadline = pool.next_cycle_time.unwrap_or(now);
    let contribution = Contribution {
        pool_id,
        user: user.clone(),
        cycle,
        amount: pool.contribution_amount,
        ledger: env.ledger().sequence(),
        contributed_at: now,
        is_late: now > deadline,
    };
    let count = storage::add_contribution(env, &contribution);

    funds::transfer(
        env,
        &pool.token,
        &user,
        &env.current_contract_address(),
        pool.contribution_amount,
    )?;

    events::publish_contribution(
        env,
        ContributionEvent {
            pool_id,
            user: user.clone(),
            cycle,
            amount: pool.contribution_amount,
            is_late: contribution.is_late,
        },
    );

    if contribution.is_late {
        reputation::apply_event(
            env,
            &user,
            Some(pool_id),
            ReputationEventType::LateContribution,
            None,
            None,
        )?;
        events::notify(
            env,
            &user,
            Notification::LatePayment(LatePaymentNotice {
                pool_id,
                cycle,
                deadline,
            }),
        );
    }

    if count == pool.size {
        let amount = pool::pot_amount(pool.contribution_amount, pool.size)?;
        if let Ok(recipient) = payout::recipient_for(env, pool_id, cycle) {
            events::notify(
                env,
                &recipient,
                Notification::PayoutReady(PayoutReadyNotice {
                    pool_id,
                    cycle,
                    amount,
                }),
            );
        }
    }

    Ok(contribution)
}

pub fn all_contributed(env: &Env, pool_id: u64, cycle: u32) -> Result<bool, ContractError> {
    let pool = pool::load_pool(env, pool_id)?;
    Ok(storage::get_contribution_count(env, pool_id, cycle) == pool.size)
}

pub fn has_contributed(
    env: &Env,
    pool_id: u64,
    user: Address,
    cycle: u32,
) -> Result<bool, ContractError> {
    pool::load_pool(env, pool_id)?;
    Ok(storage::has_contribution(env, pool_id, cycle, &user))
}

pub fn get_contribution(
    env: &Env,
    pool_id: u64,
    cycle: u32,
    user: Address,
) -> Option<Contribution> {
    storage::get_contribution(env, pool_id, cycle, &user)
}

/// Nudges every active member who still owes the current cycle. Returns how
/// many reminders went out. Callable by a member, the pool creator or the
/// protocol admin.
pub fn send_reminders(env: &Env, caller: Address, pool_id: u64) -> Result<u32, ContractError> {
    caller.require_auth();

    let pool = pool::load_pool(env, pool_id)?;
    if !storage::has_member(env, pool_id, &caller) {
        admin::require_pool_admin(env, &caller, &pool)?;
    }

    if pool.status != PoolStatus::Active {
        return Err(ContractError::PoolNotActive);
    }

    let due = pool.next_cycle_time.unwrap_or(env.ledger().timestamp());
    let mut sent = 0;
    for user in pool.members.iter() {
        let active = storage::get_member(env, pool_id, &user)
            .map(|m| m.status == MemberStatus::Active)
            .unwrap_or(false);
        if !active || storage::has_contribution(env, pool_id, pool.current_cycle, &user) {
            continue;
        }
        events::notify(
            env,
            &user,
            Notification::ContributionReminder(ContributionReminderNotice {
                pool_id,
                cycle: pool.current_cycle,
                amount: pool.contribution_amount,
                due,
            }),
        );
        sent += 1;
    }

    Ok(sent)
}
