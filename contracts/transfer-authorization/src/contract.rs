use cosmwasm_std::{
    entry_point, to_json_binary, to_json_string, Addr, Api, Binary, Coin, Deps, DepsMut, Env,
    MessageInfo, Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    AllocationInput, AllowanceResponse, ExecuteMsg, GrantResponse, GrantsResponse, InstantiateMsg,
    QueryMsg, RecipientAllowedResponse,
};
use crate::state::{Allocation, GRANTS};

const CONTRACT_NAME: &str = "crates.io:transfer-authorization";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_GRANTS_LIMIT: usize = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Approve {
            grantee,
            allocations,
        } => execute_approve(deps, info, grantee, allocations),
        ExecuteMsg::Revoke { grantee } => execute_revoke(deps, info, grantee),
        ExecuteMsg::IncreaseAllowance {
            grantee,
            source_port,
            source_channel,
            denom,
            amount,
        } => execute_increase_allowance(
            deps,
            info,
            grantee,
            source_port,
            source_channel,
            denom,
            amount,
        ),
        ExecuteMsg::DecreaseAllowance {
            grantee,
            source_port,
            source_channel,
            denom,
            amount,
        } => execute_decrease_allowance(
            deps,
            info,
            grantee,
            source_port,
            source_channel,
            denom,
            amount,
        ),
    }
}

pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    grantee: String,
    allocations: Vec<AllocationInput>,
) -> Result<Response, ContractError> {
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    // Cannot grant an allowance to self
    if info.sender == grantee_addr {
        return Err(ContractError::SelfGrant {});
    }

    if allocations.is_empty() {
        return Err(ContractError::EmptyAllocations {});
    }

    let validated: Vec<Allocation> = allocations
        .into_iter()
        .map(|input| validate_allocation(deps.api, input))
        .collect::<Result<_, _>>()?;

    // Full overwrite of any prior grant for this grantee
    GRANTS.save(deps.storage, (&info.sender, &grantee_addr), &validated)?;

    Ok(Response::new()
        .add_attribute("method", "approve")
        .add_attribute("granter", info.sender)
        .add_attribute("grantee", grantee)
        .add_attribute("allocations", to_json_string(&validated)?))
}

fn validate_allocation(api: &dyn Api, input: AllocationInput) -> Result<Allocation, ContractError> {
    if input.source_port.is_empty() || input.source_channel.is_empty() {
        return Err(ContractError::InvalidScope {});
    }

    if input.spend_limit.is_empty() {
        return Err(ContractError::InvalidLimit {});
    }
    for (i, coin) in input.spend_limit.iter().enumerate() {
        if coin.amount.is_zero() {
            return Err(ContractError::InvalidLimit {});
        }
        if input.spend_limit[..i].iter().any(|c| c.denom == coin.denom) {
            return Err(ContractError::DuplicateDenom {});
        }
    }

    let allow_list = input
        .allow_list
        .iter()
        .map(|addr| api.addr_validate(addr))
        .collect::<StdResult<Vec<Addr>>>()?;

    Ok(Allocation {
        source_port: input.source_port,
        source_channel: input.source_channel,
        spend_limit: input.spend_limit,
        allow_list,
    })
}

pub fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    grantee: String,
) -> Result<Response, ContractError> {
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    if !GRANTS.has(deps.storage, (&info.sender, &grantee_addr)) {
        return Err(ContractError::GrantNotFound {});
    }

    GRANTS.remove(deps.storage, (&info.sender, &grantee_addr));

    Ok(Response::new()
        .add_attribute("method", "revoke")
        .add_attribute("granter", info.sender)
        .add_attribute("grantee", grantee))
}

pub fn execute_increase_allowance(
    deps: DepsMut,
    info: MessageInfo,
    grantee: String,
    source_port: String,
    source_channel: String,
    denom: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let mut allocations = GRANTS
        .may_load(deps.storage, (&info.sender, &grantee_addr))?
        .ok_or(ContractError::GrantNotFound {})?;

    // Adjustments target the first allocation matching the scope
    let allocation = allocations
        .iter_mut()
        .find(|a| a.matches_scope(&source_port, &source_channel))
        .ok_or(ContractError::ScopeNotFound {})?;

    match allocation.spend_limit.iter_mut().find(|c| c.denom == denom) {
        Some(coin) => {
            coin.amount = coin
                .amount
                .checked_add(amount)
                .map_err(|_| ContractError::Overflow {})?;
        }
        None => allocation.spend_limit.push(Coin {
            denom: denom.clone(),
            amount,
        }),
    }

    GRANTS.save(deps.storage, (&info.sender, &grantee_addr), &allocations)?;

    Ok(Response::new()
        .add_attribute("method", "increase_allowance")
        .add_attribute("granter", info.sender)
        .add_attribute("grantee", grantee)
        .add_attribute("source_port", source_port)
        .add_attribute("source_channel", source_channel)
        .add_attribute("denom", denom)
        .add_attribute("amount", amount))
}

pub fn execute_decrease_allowance(
    deps: DepsMut,
    info: MessageInfo,
    grantee: String,
    source_port: String,
    source_channel: String,
    denom: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let mut allocations = GRANTS
        .may_load(deps.storage, (&info.sender, &grantee_addr))?
        .ok_or(ContractError::GrantNotFound {})?;

    let allocation = allocations
        .iter_mut()
        .find(|a| a.matches_scope(&source_port, &source_channel))
        .ok_or(ContractError::ScopeNotFound {})?;

    let coin = allocation
        .spend_limit
        .iter_mut()
        .find(|c| c.denom == denom)
        .ok_or(ContractError::ScopeNotFound {})?;

    // Depleted entries stay at zero; only Revoke destroys a grant
    coin.amount = coin
        .amount
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientAllowance {})?;

    GRANTS.save(deps.storage, (&info.sender, &grantee_addr), &allocations)?;

    Ok(Response::new()
        .add_attribute("method", "decrease_allowance")
        .add_attribute("granter", info.sender)
        .add_attribute("grantee", grantee)
        .add_attribute("source_port", source_port)
        .add_attribute("source_channel", source_channel)
        .add_attribute("denom", denom)
        .add_attribute("amount", amount))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Allowance { granter, grantee } => {
            to_json_binary(&query_allowance(deps, granter, grantee)?)
        }
        QueryMsg::AllGrants { granter, limit } => {
            to_json_binary(&query_all_grants(deps, granter, limit)?)
        }
        QueryMsg::RecipientAllowed {
            granter,
            grantee,
            source_port,
            source_channel,
            recipient,
        } => to_json_binary(&query_recipient_allowed(
            deps,
            granter,
            grantee,
            source_port,
            source_channel,
            recipient,
        )?),
    }
}

fn query_allowance(deps: Deps, granter: String, grantee: String) -> StdResult<AllowanceResponse> {
    let granter_addr = deps.api.addr_validate(&granter)?;
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    let allocations = GRANTS
        .may_load(deps.storage, (&granter_addr, &grantee_addr))?
        .unwrap_or_default();

    Ok(AllowanceResponse { allocations })
}

fn query_all_grants(
    deps: Deps,
    granter: String,
    limit: Option<u32>,
) -> StdResult<GrantsResponse> {
    let granter_addr = deps.api.addr_validate(&granter)?;
    let limit = limit.map_or(DEFAULT_GRANTS_LIMIT, |l| l as usize);

    let grants: Vec<GrantResponse> = GRANTS
        .prefix(&granter_addr)
        .range(deps.storage, None, None, Order::Ascending)
        .take(limit)
        .filter_map(|item| {
            let (grantee, allocations) = item.ok()?;
            Some(GrantResponse {
                grantee,
                allocations,
            })
        })
        .collect();

    Ok(GrantsResponse { grants })
}

fn query_recipient_allowed(
    deps: Deps,
    granter: String,
    grantee: String,
    source_port: String,
    source_channel: String,
    recipient: String,
) -> StdResult<RecipientAllowedResponse> {
    let granter_addr = deps.api.addr_validate(&granter)?;
    let grantee_addr = deps.api.addr_validate(&grantee)?;

    let allocations = GRANTS
        .may_load(deps.storage, (&granter_addr, &grantee_addr))?
        .unwrap_or_default();

    let allocation = allocations
        .iter()
        .find(|a| a.matches_scope(&source_port, &source_channel));

    let Some(allocation) = allocation else {
        return Ok(RecipientAllowedResponse {
            allowed: false,
            reason: "No allocation for this scope".to_string(),
        });
    };

    if allocation.allow_list.is_empty() {
        return Ok(RecipientAllowedResponse {
            allowed: true,
            reason: "Allow-list empty, recipients unrestricted".to_string(),
        });
    }

    let allowed = allocation
        .allow_list
        .iter()
        .any(|addr| addr.as_str() == recipient);

    Ok(RecipientAllowedResponse {
        allowed,
        reason: if allowed {
            "Recipient on allow-list".to_string()
        } else {
            "Recipient not on allow-list".to_string()
        },
    })
}
