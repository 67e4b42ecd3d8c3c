use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;
use raffle_common::Ticket;

use crate::msg::TicketsResponse;
use crate::state::{CAMPAIGN_TICKETS, HOLDER_TICKETS, NEXT_TICKET_ID, TICKETS};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

fn load_ticket(deps: Deps, ticket_id: u64) -> StdResult<Ticket> {
    TICKETS
        .may_load(deps.storage, ticket_id)?
        .ok_or_else(|| StdError::not_found(format!("ticket {}", ticket_id)))
}

pub fn query_campaign_id(deps: Deps, ticket_id: u64) -> StdResult<Binary> {
    let ticket = load_ticket(deps, ticket_id)?;
    to_json_binary(&ticket.campaign)
}

pub fn query_price(deps: Deps, ticket_id: u64) -> StdResult<Binary> {
    let ticket = load_ticket(deps, ticket_id)?;
    to_json_binary(&ticket.price)
}

pub fn query_ticket(deps: Deps, ticket_id: u64) -> StdResult<Binary> {
    to_json_binary(&load_ticket(deps, ticket_id)?)
}

pub fn query_ticket_by_sequence(deps: Deps, campaign: String, sequence: u64) -> StdResult<Binary> {
    let campaign = deps.api.addr_validate(&campaign)?;
    let ticket = match CAMPAIGN_TICKETS.may_load(deps.storage, (&campaign, sequence))? {
        Some(ticket_id) => Some(load_ticket(deps, ticket_id)?),
        None => None,
    };
    to_json_binary(&ticket)
}

pub fn query_tickets_by_holder(
    deps: Deps,
    holder: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tickets = HOLDER_TICKETS
        .prefix(&holder)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|id| id.and_then(|id| load_ticket(deps, id)))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TicketsResponse { tickets })
}

pub fn query_campaign_tickets(
    deps: Deps,
    campaign: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let campaign = deps.api.addr_validate(&campaign)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tickets = CAMPAIGN_TICKETS
        .prefix(&campaign)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|entry| entry.and_then(|(_, id)| load_ticket(deps, id)))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TicketsResponse { tickets })
}

pub fn query_total_minted(deps: Deps) -> StdResult<Binary> {
    let next_id = NEXT_TICKET_ID.may_load(deps.storage)?.unwrap_or(1);
    to_json_binary(&(next_id - 1))
}
