use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{CampaignConfig, CampaignState, CAMPAIGN, CONFIG};

const CONTRACT_NAME: &str = "crates.io:raffle-campaign";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_campaign_params(&msg, env.block.height)?;

    let owner = match &msg.owner {
        Some(owner) => deps.api.addr_validate(owner)?,
        None => info.sender.clone(),
    };

    let config = CampaignConfig {
        owner: owner.clone(),
        ticket_registry: deps.api.addr_validate(&msg.ticket_registry)?,
        name: msg.name,
        description: msg.description,
        deadline: msg.deadline,
        ticket_price: msg.ticket_price,
        denom: msg.denom,
        total_tickets: msg.total_tickets,
        total_winners: msg.total_winners,
    };
    CONFIG.save(deps.storage, &config)?;
    CAMPAIGN.save(deps.storage, &CampaignState::new())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle-campaign")
        .add_attribute("owner", owner.to_string())
        .add_attribute("total_tickets", config.total_tickets.to_string())
        .add_attribute("deadline", config.deadline.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BuyTicket {} => execute::buy_ticket(deps, env, info),
        ExecuteMsg::SetWinners { winners } => execute::set_winners(deps, env, info, winners),
        ExecuteMsg::Withdraw { beneficiary } => execute::withdraw(deps, env, info, beneficiary),
        ExecuteMsg::Close {} => execute::close(deps, env, info),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::CampaignState {} => query::query_campaign_state(deps, env),
        QueryMsg::ContractBalance {} => query::query_contract_balance(deps),
        QueryMsg::TotalTickets {} => query::query_total_tickets(deps),
        QueryMsg::TicketsBought {} => query::query_tickets_bought(deps),
        QueryMsg::Campaign {} => query::query_campaign(deps, env),
        QueryMsg::Winners {} => query::query_winners(deps),
        QueryMsg::Purchases { start_after, limit } => {
            query::query_purchases(deps, start_after, limit)
        }
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
