//! Event payloads and topic helpers.
//!
//! Lifecycle events are published under `("pool", action)`. Notification
//! intents for off-chain delivery go out under `("notify", user)` and carry a
//! [`Notification`], whose variant fixes the fields each message template needs.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{Payout, ReputationEvent};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFullNotice {
    pub pool_id: u64,
    /// Deadline of the first cycle.
    pub first_deadline: u64,
    pub payout_position: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutReadyNotice {
    pub pool_id: u64,
    pub cycle: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LatePaymentNotice {
    pub pool_id: u64,
    pub cycle: u32,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultWarningNotice {
    pub pool_id: u64,
    pub cycle: u32,
    pub reputation_score: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReminderNotice {
    pub pool_id: u64,
    pub cycle: u32,
    pub amount: i128,
    pub due: u64,
}

/// Notification intent addressed to a single user.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    PoolFull(PoolFullNotice),
    PayoutReady(PayoutReadyNotice),
    LatePayment(LatePaymentNotice),
    DefaultWarning(DefaultWarningNotice),
    ContributionReminder(ContributionReminderNotice),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberJoinedEvent {
    pub pool_id: u64,
    pub user: Address,
    pub payout_position: u32,
    pub reputation_snapshot: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionEvent {
    pub pool_id: u64,
    pub user: Address,
    pub cycle: u32,
    pub amount: i128,
    pub is_late: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleAdvancedEvent {
    pub pool_id: u64,
    pub cycle: u32,
    pub next_cycle_time: u64,
}

pub fn notify(env: &Env, user: &Address, notification: Notification) {
    env.events()
        .publish((symbol_short!("notify"), user.clone()), notification);
}

fn pool_topic(action: Symbol) -> (Symbol, Symbol) {
    (symbol_short!("pool"), action)
}

pub fn publish_pool_created(env: &Env, pool_id: u64, creator: &Address) {
    env.events()
        .publish(pool_topic(symbol_short!("created")), (pool_id, creator.clone()));
}

pub fn publish_member_joined(env: &Env, event: MemberJoinedEvent) {
    env.events().publish(pool_topic(symbol_short!("joined")), event);
}

pub fn publish_pool_activated(env: &Env, pool_id: u64) {
    env.events()
        .publish(pool_topic(symbol_short!("activated")), pool_id);
}

pub fn publish_contribution(env: &Env, event: ContributionEvent) {
    env.events().publish(pool_topic(symbol_short!("contrib")), event);
}

pub fn publish_payout(env: &Env, payout: &Payout) {
    env.events()
        .publish(pool_topic(symbol_short!("payout")), payout.clone());
}

pub fn publish_cycle_advanced(env: &Env, event: CycleAdvancedEvent) {
    env.events().publish(pool_topic(symbol_short!("cycle")), event);
}

pub fn publish_pool_completed(env: &Env, pool_id: u64) {
    env.events()
        .publish(pool_topic(symbol_short!("completed")), pool_id);
}

pub fn publish_status_change(env: &Env, action: Symbol, pool_id: u64) {
    env.events().publish(pool_topic(action), pool_id);
}

pub fn publish_reputation_event(env: &Env, event: &ReputationEvent) {
    env.events().publish(
        (symbol_short!("rep"), event.user.clone()),
        event.clone(),
    );
}
