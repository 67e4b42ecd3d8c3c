use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    CampaignResponse, PurchaseEntry, PurchasesResponse, WinnerEntry, WinnersResponse,
};
use crate::state::{CampaignState, CAMPAIGN, CONFIG, PURCHASES};

/// Campaign state as seen at the current block, with the deadline close applied.
fn current_campaign(deps: Deps, env: &Env) -> StdResult<CampaignState> {
    let config = CONFIG.load(deps.storage)?;
    let mut campaign = CAMPAIGN.load(deps.storage)?;
    campaign.close_if_expired(config.deadline, env.block.height);
    Ok(campaign)
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_campaign_state(deps: Deps, env: Env) -> StdResult<Binary> {
    let campaign = current_campaign(deps, &env)?;
    to_json_binary(&campaign.status)
}

pub fn query_contract_balance(deps: Deps) -> StdResult<Binary> {
    let campaign = CAMPAIGN.load(deps.storage)?;
    to_json_binary(&campaign.balance)
}

pub fn query_total_tickets(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.total_tickets)
}

pub fn query_tickets_bought(deps: Deps) -> StdResult<Binary> {
    let campaign = CAMPAIGN.load(deps.storage)?;
    to_json_binary(&campaign.tickets_sold)
}

pub fn query_campaign(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let campaign = current_campaign(deps, &env)?;

    to_json_binary(&CampaignResponse {
        name: config.name,
        description: config.description,
        owner: config.owner,
        deadline: config.deadline,
        ticket_price: config.ticket_price,
        denom: config.denom,
        total_tickets: config.total_tickets,
        total_winners: config.total_winners,
        tickets_sold: campaign.tickets_sold,
        balance: campaign.balance,
        total_withdrawn: campaign.total_withdrawn,
        status: campaign.status,
        closed_at_height: campaign.closed_at_height,
    })
}

pub fn query_winners(deps: Deps) -> StdResult<Binary> {
    let campaign = CAMPAIGN.load(deps.storage)?;

    let winners = campaign
        .winners
        .iter()
        .map(|&sequence| {
            PURCHASES
                .load(deps.storage, sequence)
                .map(|holder| WinnerEntry { sequence, holder })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&WinnersResponse { winners })
}

pub fn query_purchases(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let purchases: Vec<PurchaseEntry> = PURCHASES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|entry| entry.map(|(sequence, buyer)| PurchaseEntry { sequence, buyer }))
        .collect::<StdResult<_>>()?;

    to_json_binary(&PurchasesResponse { purchases })
}
