use soroban_sdk::{symbol_short, Address, Env};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{ProtocolConfig, MAX_REPUTATION};

/// Hard bounds on pool size; the configured range may only narrow them.
pub const POOL_SIZE_FLOOR: u32 = 2;
pub const POOL_SIZE_CEILING: u32 = 20;

pub const DEFAULT_INITIAL_REPUTATION: u32 = 500;

pub fn default_config() -> ProtocolConfig {
    ProtocolConfig {
        min_pool_size: POOL_SIZE_FLOOR,
        max_pool_size: POOL_SIZE_CEILING,
        initial_reputation: DEFAULT_INITIAL_REPUTATION,
    }
}

pub fn validate(config: &ProtocolConfig) -> Result<(), ContractError> {
    if config.min_pool_size < POOL_SIZE_FLOOR
        || config.max_pool_size > POOL_SIZE_CEILING
        || config.min_pool_size > config.max_pool_size
    {
        return Err(ContractError::InvalidParameters);
    }
    if config.initial_reputation > MAX_REPUTATION {
        return Err(ContractError::InvalidParameters);
    }
    Ok(())
}

pub fn get_config(env: &Env) -> ProtocolConfig {
    storage::get_config(env).unwrap_or_else(default_config)
}

pub fn require_protocol_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin = storage::get_admin(env).ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn update_config(
    env: &Env,
    admin: Address,
    config: ProtocolConfig,
) -> Result<(), ContractError> {
    admin.require_auth();
    require_protocol_admin(env, &admin)?;
    validate(&config)?;

    storage::set_config(env, &config);

    env.events()
        .publish((symbol_short!("cfg_upd"),), config);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate(&default_config()), Ok(()));
    }

    #[test]
    fn rejects_widened_or_inverted_bounds() {
        let mut config = default_config();
        config.min_pool_size = 1;
        assert_eq!(validate(&config), Err(ContractError::InvalidParameters));

        let mut config = default_config();
        config.max_pool_size = 21;
        assert_eq!(validate(&config), Err(ContractError::InvalidParameters));

        let mut config = default_config();
        config.min_pool_size = 10;
        config.max_pool_size = 5;
        assert_eq!(validate(&config), Err(ContractError::InvalidParameters));
    }

    #[test]
    fn rejects_initial_reputation_above_max() {
        let mut config = default_config();
        config.initial_reputation = 1001;
        assert_eq!(validate(&config), Err(ContractError::InvalidParameters));
    }
}
