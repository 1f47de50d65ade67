use soroban_sdk::{contracterror, log, Address, Env, String, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    Unauthorized = 2,
    InvalidParameters = 3,
    PoolNotFound = 4,
    PoolNotJoinable = 5,
    AlreadyMember = 6,
    NotMember = 7,
    PoolNotActive = 8,
    WrongCycle = 9,
    DuplicateContribution = 10,
    PayoutNotReady = 11,
    RecipientNotFound = 12,
    InvalidEvent = 13,
    TransferFailed = 14,
    TemplateLimitReached = 15,
    TemplateNotFound = 16,
    MemberNotDefaulted = 17,
    DisputeNotFound = 18,
    DisputeClosed = 19,
    DeadlineNotReached = 20,
}

impl ContractError {
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "contract has not been initialized",
            ContractError::Unauthorized => "caller is not allowed to perform this action",
            ContractError::InvalidParameters => "pool settings are out of bounds",
            ContractError::PoolNotFound => "pool does not exist",
            ContractError::PoolNotJoinable => "pool is not accepting members",
            ContractError::AlreadyMember => "user is already a member of this pool",
            ContractError::NotMember => "user is not an active member of this pool",
            ContractError::PoolNotActive => "pool is not active",
            ContractError::WrongCycle => "contribution is not for the current cycle",
            ContractError::DuplicateContribution => "user already contributed for this cycle",
            ContractError::PayoutNotReady => "payout for this cycle is not ready or already paid",
            ContractError::RecipientNotFound => "no active member holds this payout position",
            ContractError::InvalidEvent => "reputation event is malformed",
            ContractError::TransferFailed => "token transfer failed",
            ContractError::TemplateLimitReached => "template limit reached",
            ContractError::TemplateNotFound => "template does not exist",
            ContractError::MemberNotDefaulted => "only a defaulted member can be replaced",
            ContractError::DisputeNotFound => "dispute does not exist",
            ContractError::DisputeClosed => "dispute is already resolved",
            ContractError::DeadlineNotReached => "the current cycle is still open",
        }
    }
}

/// Records a failed entry point with enough context to replay it, then hands
/// the result back unchanged.
pub fn logged<T>(
    env: &Env,
    op: &str,
    pool_id: u64,
    user: Option<&Address>,
    result: Result<T, ContractError>,
) -> Result<T, ContractError> {
    if let Err(err) = &result {
        let op = Symbol::new(env, op);
        let code = *err as u32;
        let reason = String::from_str(env, err.message());
        match user {
            Some(user) => log!(env, "operation failed", op, pool_id, user.clone(), code, reason),
            None => log!(env, "operation failed", op, pool_id, code, reason),
        }
    }
    result
}
