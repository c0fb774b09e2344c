use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin};
use cw_storage_plus::Map;

#[cw_serde]
pub struct Allocation {
    /// IBC source port the allowance is scoped to
    pub source_port: String,
    /// IBC source channel the allowance is scoped to
    pub source_channel: String,
    /// Per-denom spend limits (at most one coin per denom)
    pub spend_limit: Vec<Coin>,
    /// Permitted transfer recipients; empty means unrestricted
    pub allow_list: Vec<Addr>,
}

impl Allocation {
    /// Whether this allocation covers the given port/channel scope
    pub fn matches_scope(&self, source_port: &str, source_channel: &str) -> bool {
        self.source_port == source_port && self.source_channel == source_channel
    }
}

/// Transfer grants indexed by (granter, grantee)
/// The Vec preserves the allocation order submitted at approval
pub const GRANTS: Map<(&Addr, &Addr), Vec<Allocation>> = Map::new("grants");
