use cosmwasm_std::{to_json_binary, DepsMut, Env, Event, MessageInfo, Response, Uint128};
use raffle_common::Ticket;

use crate::error::ContractError;
use crate::state::{CAMPAIGN_SEQ, CAMPAIGN_TICKETS, HOLDER_TICKETS, NEXT_TICKET_ID, TICKETS};

/// Mint a ticket for `buyer`. The sender is recorded as the ticket's campaign,
/// so a campaign can only ever mint into its own sequence.
pub fn mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    buyer: String,
    price: Uint128,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::FundsNotAccepted);
    }

    let holder = deps.api.addr_validate(&buyer)?;
    let campaign = info.sender;

    let ticket_id = NEXT_TICKET_ID.load(deps.storage)?;
    NEXT_TICKET_ID.save(deps.storage, &(ticket_id + 1))?;

    let sequence = CAMPAIGN_SEQ
        .may_load(deps.storage, &campaign)?
        .unwrap_or(0)
        + 1;
    CAMPAIGN_SEQ.save(deps.storage, &campaign, &sequence)?;

    let ticket = Ticket {
        id: ticket_id,
        campaign: campaign.clone(),
        holder: holder.clone(),
        price,
        sequence,
        minted_at_height: env.block.height,
    };
    TICKETS.save(deps.storage, ticket_id, &ticket)?;
    CAMPAIGN_TICKETS.save(deps.storage, (&campaign, sequence), &ticket_id)?;
    HOLDER_TICKETS.save(deps.storage, (&holder, ticket_id), &())?;

    Ok(Response::new()
        .set_data(to_json_binary(&ticket)?)
        .add_attribute("action", "mint")
        .add_attribute("ticket_id", ticket_id.to_string())
        .add_attribute("holder", holder.to_string())
        .add_event(
            Event::new("raffle_ticket_minted")
                .add_attribute("ticket_id", ticket_id.to_string())
                .add_attribute("campaign", campaign.to_string())
                .add_attribute("holder", holder.to_string())
                .add_attribute("price", price.to_string())
                .add_attribute("sequence", sequence.to_string()),
        ))
}
