// IBC transfer authorization: delegated spend allowances scoped by
// source port, channel and denom

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
