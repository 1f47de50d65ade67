//! Reputation scoring.
//!
//! Scores live in [`MIN_REPUTATION`, `MAX_REPUTATION`]. Every scoring decision
//! writes the user's profile and appends one [`ReputationEvent`] in the same
//! invocation, so the log and the score never disagree.

use soroban_sdk::{Address, Env, String, Vec};

use crate::config;
use crate::errors::ContractError;
use crate::events;
use crate::storage;
use crate::types::{
    ReputationEvent, ReputationEventType, ReputationTier, UserProfile, MAX_REPUTATION,
    MIN_REPUTATION,
};

pub const POOL_COMPLETED_DELTA: i32 = 50;
pub const EARLY_CONTRIBUTION_DELTA: i32 = 5;
pub const LATE_CONTRIBUTION_DELTA: i32 = -20;
pub const DEFAULT_DELTA: i32 = -100;

/// Requested change for an event type. Only manual adjustments carry an
/// explicit delta, and they must.
pub fn score_change(
    event_type: ReputationEventType,
    manual_delta: Option<i32>,
) -> Result<i32, ContractError> {
    match (event_type, manual_delta) {
        (ReputationEventType::ManualAdjustment, Some(delta)) => Ok(delta),
        (ReputationEventType::ManualAdjustment, None) => Err(ContractError::InvalidEvent),
        (_, Some(_)) => Err(ContractError::InvalidEvent),
        (ReputationEventType::PoolCompleted, None) => Ok(POOL_COMPLETED_DELTA),
        (ReputationEventType::EarlyContribution, None) => Ok(EARLY_CONTRIBUTION_DELTA),
        (ReputationEventType::LateContribution, None) => Ok(LATE_CONTRIBUTION_DELTA),
        (ReputationEventType::Default, None) => Ok(DEFAULT_DELTA),
    }
}

pub fn clamp_score(current: u32, delta: i32) -> u32 {
    let raw = current as i64 + delta as i64;
    raw.clamp(MIN_REPUTATION as i64, MAX_REPUTATION as i64) as u32
}

pub fn tier(score: u32) -> ReputationTier {
    match score {
        800..=u32::MAX => ReputationTier::Excellent,
        600..=799 => ReputationTier::Good,
        400..=599 => ReputationTier::Fair,
        _ => ReputationTier::Poor,
    }
}

fn default_note(env: &Env, event_type: ReputationEventType) -> String {
    let note = match event_type {
        ReputationEventType::PoolCompleted => "POOL_COMPLETED event",
        ReputationEventType::LateContribution => "LATE_CONTRIBUTION event",
        ReputationEventType::Default => "DEFAULT event",
        ReputationEventType::EarlyContribution => "EARLY_CONTRIBUTION event",
        ReputationEventType::ManualAdjustment => "MANUAL_ADJUSTMENT event",
    };
    String::from_str(env, note)
}

/// Profile for `user`, or a fresh one at the configured starting score.
pub fn load_profile(env: &Env, user: &Address) -> UserProfile {
    storage::get_user(env, user).unwrap_or_else(|| UserProfile {
        reputation_score: config::get_config(env).initial_reputation,
        completed_pools: 0,
        late_count: 0,
        default_count: 0,
    })
}

pub fn current_score(env: &Env, user: &Address) -> u32 {
    load_profile(env, user).reputation_score
}

pub fn apply_event(
    env: &Env,
    user: &Address,
    pool_id: Option<u64>,
    event_type: ReputationEventType,
    manual_delta: Option<i32>,
    notes: Option<String>,
) -> Result<ReputationEvent, ContractError> {
    let requested = score_change(event_type, manual_delta)?;

    let mut profile = load_profile(env, user);
    let old_score = profile.reputation_score;
    let new_score = clamp_score(old_score, requested);

    match event_type {
        ReputationEventType::PoolCompleted => profile.completed_pools += 1,
        ReputationEventType::LateContribution => profile.late_count += 1,
        ReputationEventType::Default => profile.default_count += 1,
        ReputationEventType::EarlyContribution | ReputationEventType::ManualAdjustment => {}
    }
    profile.reputation_score = new_score;

    let event = ReputationEvent {
        user: user.clone(),
        pool_id,
        event_type,
        score_change: new_score as i32 - old_score as i32,
        notes: notes.unwrap_or_else(|| default_note(env, event_type)),
        created_at: env.ledger().timestamp(),
    };

    storage::set_user(env, user, &profile);
    storage::append_reputation_log(env, &event);
    events::publish_reputation_event(env, &event);

    Ok(event)
}

pub fn get_events(env: &Env, user: &Address) -> Vec<ReputationEvent> {
    let mut out = Vec::new(env);
    for index in 0..storage::get_reputation_log_len(env, user) {
        if let Some(event) = storage::get_reputation_log_entry(env, user, index) {
            out.push_back(event);
        }
    }
    out
}

/// Admin-reported event, e.g. a manual correction after a dispute.
pub fn report_event(
    env: &Env,
    admin: Address,
    user: Address,
    pool_id: Option<u64>,
    event_type: ReputationEventType,
    manual_delta: Option<i32>,
    notes: Option<String>,
) -> Result<ReputationEvent, ContractError> {
    admin.require_auth();
    config::require_protocol_admin(env, &admin)?;

    if let Some(pool_id) = pool_id {
        storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;
    }

    apply_event(env, &user, pool_id, event_type, manual_delta, notes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn delta_table() {
        assert_eq!(score_change(ReputationEventType::PoolCompleted, None), Ok(50));
        assert_eq!(score_change(ReputationEventType::EarlyContribution, None), Ok(5));
        assert_eq!(score_change(ReputationEventType::LateContribution, None), Ok(-20));
        assert_eq!(score_change(ReputationEventType::Default, None), Ok(-100));
        assert_eq!(
            score_change(ReputationEventType::ManualAdjustment, Some(-37)),
            Ok(-37)
        );
    }

    #[test]
    fn manual_adjustment_requires_delta() {
        assert_eq!(
            score_change(ReputationEventType::ManualAdjustment, None),
            Err(ContractError::InvalidEvent)
        );
    }

    #[test]
    fn fixed_events_reject_explicit_delta() {
        assert_eq!(
            score_change(ReputationEventType::Default, Some(-5)),
            Err(ContractError::InvalidEvent)
        );
    }

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(clamp_score(980, POOL_COMPLETED_DELTA), 1000);
        assert_eq!(clamp_score(50, DEFAULT_DELTA), 0);
        assert_eq!(clamp_score(500, LATE_CONTRIBUTION_DELTA), 480);
        assert_eq!(clamp_score(0, i32::MIN), 0);
        assert_eq!(clamp_score(1000, i32::MAX), 1000);
    }

    #[test]
    fn tiers() {
        assert_eq!(tier(1000), ReputationTier::Excellent);
        assert_eq!(tier(800), ReputationTier::Excellent);
        assert_eq!(tier(799), ReputationTier::Good);
        assert_eq!(tier(600), ReputationTier::Good);
        assert_eq!(tier(400), ReputationTier::Fair);
        assert_eq!(tier(399), ReputationTier::Poor);
        assert_eq!(tier(0), ReputationTier::Poor);
    }
}
