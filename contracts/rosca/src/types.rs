use soroban_sdk::{contracttype, Address, String, Vec};

pub const WEEKLY_CADENCE: u64 = 604_800;
pub const MONTHLY_CADENCE: u64 = 2_592_000;

pub const MIN_REPUTATION: u32 = 0;
pub const MAX_REPUTATION: u32 = 1000;

/// Status of a pool throughout its lifecycle.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    Pending = 0,   // Accepting members
    Active = 1,    // Roster full, cycles in progress
    Completed = 2, // Every member has been paid
    Paused = 3,    // Frozen by an administrator
}

/// How payout positions are assigned when the pool activates.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayoutMode {
    Fixed = 0,  // Join order
    Random = 1, // One-time permutation at activation
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberStatus {
    Active = 0,
    Replaced = 1,
    Defaulted = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReputationEventType {
    PoolCompleted = 0,
    LateContribution = 1,
    Default = 2,
    EarlyContribution = 3,
    ManualAdjustment = 4,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReputationTier {
    Poor = 0,
    Fair = 1,
    Good = 2,
    Excellent = 3,
}

/// User-chosen parameters for a new pool. Also the body of a saved template.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSettings {
    pub name: String,
    pub token: Address,
    pub size: u32,
    pub contribution_amount: i128,
    pub cadence_seconds: u64,
    pub payout_mode: PayoutMode,
    pub stake_enabled: bool,
    pub default_fund_enabled: bool,
}

/// Core pool configuration and state.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Pool {
    pub id: u64,
    pub creator: Address,
    pub name: String,
    pub token: Address,
    pub size: u32,
    pub contribution_amount: i128,
    pub cadence_seconds: u64,
    pub payout_mode: PayoutMode,
    pub stake_enabled: bool,
    pub default_fund_enabled: bool,
    pub status: PoolStatus,
    pub current_cycle: u32,
    /// Deadline of the current cycle. `None` until the pool activates.
    pub next_cycle_time: Option<u64>,
    /// When the current pause began. Cleared on resume.
    pub paused_at: Option<u64>,
    /// Current roster in join order. A replacement takes over the replaced slot.
    pub members: Vec<Address>,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolMember {
    pub pool_id: u64,
    pub user: Address,
    pub payout_position: u32,
    pub has_received_payout: bool,
    pub reputation_snapshot: u32,
    pub status: MemberStatus,
    pub joined_at: u64,
}

/// One member's payment for one cycle. Never updated once written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub pool_id: u64,
    pub user: Address,
    pub cycle: u32,
    pub amount: i128,
    pub ledger: u32,
    pub contributed_at: u64,
    pub is_late: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub pool_id: u64,
    pub cycle: u32,
    pub recipient: Address,
    pub base_amount: i128,
    pub yield_amount: i128,
    pub total_amount: i128,
    pub ledger: u32,
    pub paid_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    pub reputation_score: u32,
    pub completed_pools: u32,
    pub late_count: u32,
    pub default_count: u32,
}

/// Audit record of one scoring decision. `score_change` is the change actually
/// applied to the score, after clamping.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReputationEvent {
    pub user: Address,
    pub pool_id: Option<u64>,
    pub event_type: ReputationEventType,
    pub score_change: i32,
    pub notes: String,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisputeKind {
    LatePayment = 0,
    NonPayment = 1,
    Misconduct = 2,
    Other = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisputeStatus {
    Open = 0,
    Resolved = 1,
}

/// Dispute raised by a member for off-chain review.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dispute {
    pub id: u32,
    pub pool_id: u64,
    pub raised_by: Address,
    pub against: Option<Address>,
    pub kind: DisputeKind,
    pub description: String,
    pub status: DisputeStatus,
    pub raised_at: u64,
}

/// Admin-configurable protocol limits.
///
/// * `min_pool_size` / `max_pool_size` – accepted range for `PoolSettings::size`,
///   always inside [2, 20].
/// * `initial_reputation` – score given to a user on first contact.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    pub min_pool_size: u32,
    pub max_pool_size: u32,
    pub initial_reputation: u32,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Config,
    PoolCounter,
    Pool(u64),
    Member(u64, Address),
    PositionHolder(u64, u32),
    MemberPools(Address),
    Contribution(u64, u32, Address),
    ContributionCount(u64, u32),
    Payout(u64, u32),
    User(Address),
    ReputationLogLen(Address),
    ReputationLog(Address, u32),
    TemplateCounter(Address),
    Template(Address, u32),
    DisputeCounter(u64),
    Dispute(u64, u32),
}
