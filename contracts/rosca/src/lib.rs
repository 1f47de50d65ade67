#![no_std]

//! Rotating savings pools (ROSCA): members pay a fixed amount every cycle and
//! one member takes the whole pot per cycle until everyone has been paid.
//!
//! Each entry point runs as a single Soroban invocation, so a failure anywhere
//! rolls back every storage write and token transfer it made. Uniqueness of
//! members, contributions and payouts is checked and written in the same
//! invocation.

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

mod admin;
mod config;
mod contribution;
mod errors;
mod events;
mod funds;
mod payout;
mod pool;
mod reputation;
mod storage;
mod types;

pub use errors::ContractError;
pub use events::{
    ContributionReminderNotice, DefaultWarningNotice, LatePaymentNotice, Notification,
    PayoutReadyNotice, PoolFullNotice,
};
pub use types::*;

use errors::logged;

#[contract]
pub struct RoscaContract;

#[contractimpl]
impl RoscaContract {
    /// Initialize the protocol with a global admin and default configuration.
    pub fn __constructor(env: Env, admin: Address) {
        if storage::has_admin(&env) {
            panic!("already initialized");
        }
        storage::set_admin(&env, &admin);
        storage::set_config(&env, &config::default_config());
    }

    // ─── Configuration ──────────────────────────────────────────────

    /// Current protocol configuration.
    pub fn get_config(env: Env) -> ProtocolConfig {
        config::get_config(&env)
    }

    /// Replace the protocol configuration. Protocol admin only.
    pub fn update_config(
        env: Env,
        admin: Address,
        new_config: ProtocolConfig,
    ) -> Result<(), ContractError> {
        let result = config::update_config(&env, admin.clone(), new_config);
        logged(&env, "update_config", 0, Some(&admin), result)
    }

    // ─── Pool Lifecycle ─────────────────────────────────────────────

    /// Create a new pool. The creator becomes its first member at position 0.
    pub fn create_pool(
        env: Env,
        creator: Address,
        settings: PoolSettings,
    ) -> Result<u64, ContractError> {
        let result = pool::create_pool(&env, creator.clone(), settings);
        logged(&env, "create_pool", 0, Some(&creator), result)
    }

    /// Join a pending pool. The join that fills the roster activates the pool.
    pub fn join_pool(env: Env, user: Address, pool_id: u64) -> Result<PoolMember, ContractError> {
        let result = pool::join_pool(&env, user.clone(), pool_id);
        logged(&env, "join_pool", pool_id, Some(&user), result)
    }

    /// Pool record with status, cycle, deadline and roster.
    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, ContractError> {
        pool::get_pool(&env, pool_id)
    }

    /// Member record for `user`; `NotMember` if they never joined.
    pub fn get_member(env: Env, pool_id: u64, user: Address) -> Result<PoolMember, ContractError> {
        pool::get_member(&env, pool_id, user)
    }

    /// Current roster with member records, in join order.
    pub fn get_members(env: Env, pool_id: u64) -> Result<Vec<PoolMember>, ContractError> {
        pool::get_members(&env, pool_id)
    }

    /// All pool IDs a user has ever joined.
    pub fn get_member_pools(env: Env, user: Address) -> Vec<u64> {
        pool::get_member_pools(&env, user)
    }

    // ─── Pool Templates ─────────────────────────────────────────────

    /// Save pool settings for quick creation later. Max 10 templates per creator.
    pub fn save_template(
        env: Env,
        creator: Address,
        settings: PoolSettings,
    ) -> Result<u32, ContractError> {
        let result = pool::save_template(&env, creator.clone(), settings);
        logged(&env, "save_template", 0, Some(&creator), result)
    }

    /// A creator's saved pool settings.
    pub fn get_template(
        env: Env,
        creator: Address,
        template_id: u32,
    ) -> Result<PoolSettings, ContractError> {
        pool::get_template(&env, creator, template_id)
    }

    /// Create a pool from a saved template under a new name.
    pub fn create_from_template(
        env: Env,
        creator: Address,
        template_id: u32,
        name: String,
    ) -> Result<u64, ContractError> {
        let result = pool::create_from_template(&env, creator.clone(), template_id, name);
        logged(&env, "create_from_template", 0, Some(&creator), result)
    }

    // ─── Contributions ──────────────────────────────────────────────

    /// Pay the contribution for `cycle`, which must be the pool's current cycle.
    pub fn contribute(
        env: Env,
        user: Address,
        pool_id: u64,
        cycle: u32,
    ) -> Result<Contribution, ContractError> {
        let result = contribution::record_contribution(&env, user.clone(), pool_id, cycle);
        logged(&env, "contribute", pool_id, Some(&user), result)
    }

    /// Whether every member has paid for `cycle`.
    pub fn all_contributed(env: Env, pool_id: u64, cycle: u32) -> Result<bool, ContractError> {
        contribution::all_contributed(&env, pool_id, cycle)
    }

    /// Whether `user` has paid for `cycle`.
    pub fn has_contributed(
        env: Env,
        pool_id: u64,
        user: Address,
        cycle: u32,
    ) -> Result<bool, ContractError> {
        contribution::has_contributed(&env, pool_id, user, cycle)
    }

    /// Contribution row for (`pool_id`, `cycle`, `user`), if any.
    pub fn get_contribution(
        env: Env,
        pool_id: u64,
        cycle: u32,
        user: Address,
    ) -> Option<Contribution> {
        contribution::get_contribution(&env, pool_id, cycle, user)
    }

    /// Emit a reminder to each active member who has not paid the current cycle.
    /// `caller` must be a member, the pool creator or the protocol admin.
    pub fn send_reminders(env: Env, caller: Address, pool_id: u64) -> Result<u32, ContractError> {
        let result = contribution::send_reminders(&env, caller.clone(), pool_id);
        logged(&env, "send_reminders", pool_id, Some(&caller), result)
    }

    // ─── Payouts ────────────────────────────────────────────────────

    /// Pay the current cycle's recipient. Anyone can call this once all
    /// contributions are in.
    pub fn trigger_payout(env: Env, pool_id: u64) -> Result<Payout, ContractError> {
        let result = payout::trigger_payout(&env, pool_id);
        logged(&env, "trigger_payout", pool_id, None, result)
    }

    /// Member holding payout position `cycle`. Fails while that slot is defaulted.
    pub fn recipient_for(env: Env, pool_id: u64, cycle: u32) -> Result<Address, ContractError> {
        payout::recipient_for(&env, pool_id, cycle)
    }

    /// Recipient of the current cycle of an active pool.
    pub fn get_current_recipient(env: Env, pool_id: u64) -> Result<Address, ContractError> {
        payout::get_current_recipient(&env, pool_id)
    }

    /// Position holders ordered by payout position.
    pub fn get_payout_order(env: Env, pool_id: u64) -> Result<Vec<Address>, ContractError> {
        payout::get_payout_order(&env, pool_id)
    }

    /// Payout made for `cycle`, if any.
    pub fn get_payout(env: Env, pool_id: u64, cycle: u32) -> Option<Payout> {
        payout::get_payout(&env, pool_id, cycle)
    }

    // ─── Reputation ─────────────────────────────────────────────────

    /// Reputation profile; unseen users get the configured starting score.
    pub fn get_user(env: Env, user: Address) -> UserProfile {
        reputation::load_profile(&env, &user)
    }

    /// Full reputation history for `user`, oldest first.
    pub fn get_reputation_events(env: Env, user: Address) -> Vec<ReputationEvent> {
        reputation::get_events(&env, &user)
    }

    /// Standing badge derived from the current score.
    pub fn get_reputation_tier(env: Env, user: Address) -> ReputationTier {
        reputation::tier(reputation::current_score(&env, &user))
    }

    /// Apply a reputation event on behalf of the protocol. Protocol admin only.
    pub fn report_reputation_event(
        env: Env,
        admin: Address,
        user: Address,
        pool_id: Option<u64>,
        event_type: ReputationEventType,
        manual_delta: Option<i32>,
        notes: Option<String>,
    ) -> Result<ReputationEvent, ContractError> {
        let result = reputation::report_event(
            &env,
            admin,
            user.clone(),
            pool_id,
            event_type,
            manual_delta,
            notes,
        );
        logged(&env, "report_reputation", pool_id.unwrap_or(0), Some(&user), result)
    }

    // ─── Admin / Governance ─────────────────────────────────────────

    /// Pause a pending or active pool (pool creator or protocol admin).
    pub fn pause_pool(env: Env, caller: Address, pool_id: u64) -> Result<(), ContractError> {
        let result = admin::pause_pool(&env, caller.clone(), pool_id);
        logged(&env, "pause_pool", pool_id, Some(&caller), result)
    }

    /// Resume a paused pool. An active pool's deadline is pushed back by the
    /// length of the pause.
    pub fn resume_pool(env: Env, caller: Address, pool_id: u64) -> Result<(), ContractError> {
        let result = admin::resume_pool(&env, caller.clone(), pool_id);
        logged(&env, "resume_pool", pool_id, Some(&caller), result)
    }

    /// Record that `user` let the current cycle's deadline pass unpaid.
    pub fn record_default(
        env: Env,
        caller: Address,
        pool_id: u64,
        user: Address,
    ) -> Result<(), ContractError> {
        let result = admin::record_default(&env, caller, pool_id, user.clone());
        logged(&env, "record_default", pool_id, Some(&user), result)
    }

    /// Give a defaulted member's slot to `new`.
    pub fn replace_member(
        env: Env,
        caller: Address,
        pool_id: u64,
        old: Address,
        new: Address,
    ) -> Result<PoolMember, ContractError> {
        let result = admin::replace_member(&env, caller, pool_id, old.clone(), new);
        logged(&env, "replace_member", pool_id, Some(&old), result)
    }

    /// Open a dispute in a pool the caller belongs to. Returns the dispute ID.
    pub fn raise_dispute(
        env: Env,
        user: Address,
        pool_id: u64,
        against: Option<Address>,
        kind: DisputeKind,
        description: String,
    ) -> Result<u32, ContractError> {
        let result = admin::raise_dispute(&env, user.clone(), pool_id, against, kind, description);
        logged(&env, "raise_dispute", pool_id, Some(&user), result)
    }

    /// Close an open dispute (pool creator or protocol admin).
    pub fn resolve_dispute(
        env: Env,
        caller: Address,
        pool_id: u64,
        dispute_id: u32,
    ) -> Result<(), ContractError> {
        let result = admin::resolve_dispute(&env, caller.clone(), pool_id, dispute_id);
        logged(&env, "resolve_dispute", pool_id, Some(&caller), result)
    }

    /// Dispute record by pool and ID.
    pub fn get_dispute(env: Env, pool_id: u64, dispute_id: u32) -> Result<Dispute, ContractError> {
        admin::get_dispute(&env, pool_id, dispute_id)
    }
}
