use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Cannot grant an allowance to self")]
    SelfGrant {},

    #[error("Allocation list cannot be empty")]
    EmptyAllocations {},

    #[error("Source port and source channel cannot be empty")]
    InvalidScope {},

    #[error("Spend limit must contain at least one coin with a non-zero amount")]
    InvalidLimit {},

    #[error("Duplicate denom in spend limit")]
    DuplicateDenom {},

    #[error("No grant found for this granter and grantee")]
    GrantNotFound {},

    #[error("No allocation matches the given source port, channel and denom")]
    ScopeNotFound {},

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Insufficient allowance")]
    InsufficientAllowance {},

    #[error("Allowance overflow")]
    Overflow {},
}
