use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::NEXT_TICKET_ID;

const CONTRACT_NAME: &str = "crates.io:raffle-ticket";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    NEXT_TICKET_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle-ticket")
        .add_attribute("creator", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { buyer, price } => execute::mint(deps, env, info, buyer, price),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::CampaignId { ticket_id } => query::query_campaign_id(deps, ticket_id),
        QueryMsg::Price { ticket_id } => query::query_price(deps, ticket_id),
        QueryMsg::Ticket { ticket_id } => query::query_ticket(deps, ticket_id),
        QueryMsg::TicketBySequence { campaign, sequence } => {
            query::query_ticket_by_sequence(deps, campaign, sequence)
        }
        QueryMsg::TicketsByHolder {
            holder,
            start_after,
            limit,
        } => query::query_tickets_by_holder(deps, holder, start_after, limit),
        QueryMsg::CampaignTickets {
            campaign,
            start_after,
            limit,
        } => query::query_campaign_tickets(deps, campaign, start_after, limit),
        QueryMsg::TotalMinted {} => query::query_total_minted(deps),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
