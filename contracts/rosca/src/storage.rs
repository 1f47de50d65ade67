use soroban_sdk::{Address, Env, Vec};

use crate::types::{
    Contribution, DataKey, Dispute, Payout, Pool, PoolMember, PoolSettings, ProtocolConfig,
    ReputationEvent, UserProfile,
};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Admin & Config ---

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_config(env: &Env) -> Option<ProtocolConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &ProtocolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// --- Pool Counter ---

pub fn get_pool_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCounter)
        .unwrap_or(0)
}

pub fn set_pool_counter(env: &Env, counter: u64) {
    env.storage().instance().set(&DataKey::PoolCounter, &counter);
    extend_instance_ttl(env);
}

// --- Pool ---

pub fn get_pool(env: &Env, pool_id: u64) -> Option<Pool> {
    let key = DataKey::Pool(pool_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_pool(env: &Env, pool: &Pool) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    extend_persistent_ttl(env, &key);
}

// --- Members ---

pub fn get_member(env: &Env, pool_id: u64, user: &Address) -> Option<PoolMember> {
    let key = DataKey::Member(pool_id, user.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn has_member(env: &Env, pool_id: u64, user: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Member(pool_id, user.clone()))
}

pub fn set_member(env: &Env, member: &PoolMember) {
    let key = DataKey::Member(member.pool_id, member.user.clone());
    env.storage().persistent().set(&key, member);
    extend_persistent_ttl(env, &key);
}

pub fn get_position_holder(env: &Env, pool_id: u64, position: u32) -> Option<Address> {
    let key = DataKey::PositionHolder(pool_id, position);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_position_holder(env: &Env, pool_id: u64, position: u32, user: &Address) {
    let key = DataKey::PositionHolder(pool_id, position);
    env.storage().persistent().set(&key, user);
    extend_persistent_ttl(env, &key);
}

// --- Member Pools ---

pub fn get_member_pools(env: &Env, user: &Address) -> Vec<u64> {
    let key = DataKey::MemberPools(user.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_member_pool(env: &Env, user: &Address, pool_id: u64) {
    let key = DataKey::MemberPools(user.clone());
    let mut pools = get_member_pools(env, user);
    pools.push_back(pool_id);
    env.storage().persistent().set(&key, &pools);
    extend_persistent_ttl(env, &key);
}

// --- Contributions ---

pub fn get_contribution(
    env: &Env,
    pool_id: u64,
    cycle: u32,
    user: &Address,
) -> Option<Contribution> {
    let key = DataKey::Contribution(pool_id, cycle, user.clone());
    env.storage().persistent().get(&key)
}

pub fn has_contribution(env: &Env, pool_id: u64, cycle: u32, user: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Contribution(pool_id, cycle, user.clone()))
}

/// Appends a contribution row and bumps the per-cycle count in one step.
pub fn add_contribution(env: &Env, contribution: &Contribution) -> u32 {
    let key = DataKey::Contribution(
        contribution.pool_id,
        contribution.cycle,
        contribution.user.clone(),
    );
    env.storage().persistent().set(&key, contribution);
    extend_persistent_ttl(env, &key);

    let count_key = DataKey::ContributionCount(contribution.pool_id, contribution.cycle);
    let count = get_contribution_count(env, contribution.pool_id, contribution.cycle) + 1;
    env.storage().persistent().set(&count_key, &count);
    extend_persistent_ttl(env, &count_key);
    count
}

pub fn get_contribution_count(env: &Env, pool_id: u64, cycle: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ContributionCount(pool_id, cycle))
        .unwrap_or(0)
}

// --- Payouts ---

pub fn get_payout(env: &Env, pool_id: u64, cycle: u32) -> Option<Payout> {
    env.storage()
        .persistent()
        .get(&DataKey::Payout(pool_id, cycle))
}

pub fn has_payout(env: &Env, pool_id: u64, cycle: u32) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Payout(pool_id, cycle))
}

pub fn set_payout(env: &Env, payout: &Payout) {
    let key = DataKey::Payout(payout.pool_id, payout.cycle);
    env.storage().persistent().set(&key, payout);
    extend_persistent_ttl(env, &key);
}

// --- Users & Reputation Log ---

pub fn get_user(env: &Env, user: &Address) -> Option<UserProfile> {
    let key = DataKey::User(user.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_user(env: &Env, user: &Address, profile: &UserProfile) {
    let key = DataKey::User(user.clone());
    env.storage().persistent().set(&key, profile);
    extend_persistent_ttl(env, &key);
}

pub fn get_reputation_log_len(env: &Env, user: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ReputationLogLen(user.clone()))
        .unwrap_or(0)
}

pub fn get_reputation_log_entry(env: &Env, user: &Address, index: u32) -> Option<ReputationEvent> {
    env.storage()
        .persistent()
        .get(&DataKey::ReputationLog(user.clone(), index))
}

pub fn append_reputation_log(env: &Env, event: &ReputationEvent) {
    let index = get_reputation_log_len(env, &event.user);
    let key = DataKey::ReputationLog(event.user.clone(), index);
    env.storage().persistent().set(&key, event);
    extend_persistent_ttl(env, &key);

    let len_key = DataKey::ReputationLogLen(event.user.clone());
    env.storage().persistent().set(&len_key, &(index + 1));
    extend_persistent_ttl(env, &len_key);
}

// --- Templates ---

pub fn get_template_counter(env: &Env, creator: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::TemplateCounter(creator.clone()))
        .unwrap_or(0)
}

pub fn set_template_counter(env: &Env, creator: &Address, counter: u32) {
    let key = DataKey::TemplateCounter(creator.clone());
    env.storage().persistent().set(&key, &counter);
    extend_persistent_ttl(env, &key);
}

pub fn get_template(env: &Env, creator: &Address, template_id: u32) -> Option<PoolSettings> {
    env.storage()
        .persistent()
        .get(&DataKey::Template(creator.clone(), template_id))
}

pub fn set_template(env: &Env, creator: &Address, template_id: u32, settings: &PoolSettings) {
    let key = DataKey::Template(creator.clone(), template_id);
    env.storage().persistent().set(&key, settings);
    extend_persistent_ttl(env, &key);
}

// --- Disputes ---

pub fn get_dispute_counter(env: &Env, pool_id: u64) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::DisputeCounter(pool_id))
        .unwrap_or(0)
}

pub fn set_dispute_counter(env: &Env, pool_id: u64, counter: u32) {
    let key = DataKey::DisputeCounter(pool_id);
    env.storage().persistent().set(&key, &counter);
    extend_persistent_ttl(env, &key);
}

pub fn get_dispute(env: &Env, pool_id: u64, dispute_id: u32) -> Option<Dispute> {
    env.storage()
        .persistent()
        .get(&DataKey::Dispute(pool_id, dispute_id))
}

pub fn set_dispute(env: &Env, dispute: &Dispute) {
    let key = DataKey::Dispute(dispute.pool_id, dispute.id);
    env.storage().persistent().set(&key, dispute);
    extend_persistent_ttl(env, &key);
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
