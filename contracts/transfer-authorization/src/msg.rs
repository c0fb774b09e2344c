use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};

use crate::state::Allocation;

#[cw_serde]
pub struct InstantiateMsg {}

/// One spend-limit scope as submitted by a granter.
/// Addresses arrive unvalidated and are checked before storage.
#[cw_serde]
pub struct AllocationInput {
    pub source_port: String,
    pub source_channel: String,
    pub spend_limit: Vec<Coin>,
    pub allow_list: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Grant the grantee the given allocations, replacing any existing grant
    Approve {
        grantee: String,
        allocations: Vec<AllocationInput>,
    },
    /// Remove the entire grant for a grantee
    Revoke { grantee: String },
    /// Raise one denom's spend limit within a port/channel scope
    IncreaseAllowance {
        grantee: String,
        source_port: String,
        source_channel: String,
        denom: String,
        amount: Uint128,
    },
    /// Lower one denom's spend limit within a port/channel scope
    DecreaseAllowance {
        grantee: String,
        source_port: String,
        source_channel: String,
        denom: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the allocations granted by granter to grantee
    #[returns(AllowanceResponse)]
    Allowance { granter: String, grantee: String },

    /// List all grants issued by a granter
    #[returns(GrantsResponse)]
    AllGrants {
        granter: String,
        limit: Option<u32>,
    },

    /// Check whether a recipient passes the allow-list of a scope
    #[returns(RecipientAllowedResponse)]
    RecipientAllowed {
        granter: String,
        grantee: String,
        source_port: String,
        source_channel: String,
        recipient: String,
    },
}

// Response types

#[cw_serde]
pub struct AllowanceResponse {
    pub allocations: Vec<Allocation>,
}

#[cw_serde]
pub struct GrantResponse {
    pub grantee: Addr,
    pub allocations: Vec<Allocation>,
}

#[cw_serde]
pub struct GrantsResponse {
    pub grants: Vec<GrantResponse>,
}

#[cw_serde]
pub struct RecipientAllowedResponse {
    pub allowed: bool,
    pub reason: String,
}
