use std::collections::BTreeSet;

use cosmwasm_std::{
    coins, to_json_binary, BankMsg, DepsMut, Env, Event, MessageInfo, Response, Uint128, WasmMsg,
};
use raffle_common::CampaignStatus;

use crate::error::ContractError;
use crate::msg::{InstantiateMsg, RegistryExecuteMsg};
use crate::state::{CampaignState, CAMPAIGN, CONFIG, PURCHASES};

/// Check the campaign parameters given at instantiation.
pub fn validate_campaign_params(msg: &InstantiateMsg, height: u64) -> Result<(), ContractError> {
    if msg.name.trim().is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "name must not be empty".to_string(),
        });
    }
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "denom must not be empty".to_string(),
        });
    }
    if msg.total_tickets == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "total_tickets must be greater than zero".to_string(),
        });
    }
    if msg.total_winners == 0 || msg.total_winners > msg.total_tickets {
        return Err(ContractError::InvalidConfig {
            reason: format!(
                "total_winners must be between 1 and {} (got {})",
                msg.total_tickets, msg.total_winners
            ),
        });
    }
    if msg.deadline <= height {
        return Err(ContractError::InvalidConfig {
            reason: format!(
                "deadline {} must be after the current block height {}",
                msg.deadline, height
            ),
        });
    }
    Ok(())
}

/// Amount of `denom` attached to the call. No funds counts as zero.
fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    match info.funds.as_slice() {
        [] => Ok(Uint128::zero()),
        [coin] if coin.denom == denom => Ok(coin.amount),
        [coin] => Err(ContractError::WrongDenom {
            denom: coin.denom.clone(),
        }),
        _ => Err(ContractError::InvalidFunds),
    }
}

fn campaign_closed_event(reason: &str, campaign: &CampaignState, height: u64) -> Event {
    Event::new("raffle_campaign_closed")
        .add_attribute("reason", reason)
        .add_attribute("tickets_sold", campaign.tickets_sold.to_string())
        .add_attribute("height", height.to_string())
}

/// Buy one ticket at the campaign price. Mints through the ticket registry and
/// closes the campaign when the last ticket is sold.
pub fn buy_ticket(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut campaign = CAMPAIGN.load(deps.storage)?;

    // A purchase past the deadline sees the campaign as closed
    campaign.close_if_expired(config.deadline, env.block.height);

    if campaign.status != CampaignStatus::Active {
        return Err(ContractError::InvalidState {
            reason: "campaign is not active".to_string(),
        });
    }
    if campaign.tickets_sold >= config.total_tickets {
        return Err(ContractError::SoldOut);
    }

    let paid = paid_amount(&info, &config.denom)?;
    if paid != config.ticket_price {
        return Err(ContractError::InsufficientPayment {
            expected: config.ticket_price,
            received: paid,
        });
    }

    campaign.tickets_sold += 1;
    let sequence = campaign.tickets_sold;
    campaign.balance = campaign.balance.checked_add(paid)?;
    PURCHASES.save(deps.storage, sequence, &info.sender)?;

    let mint_msg = WasmMsg::Execute {
        contract_addr: config.ticket_registry.to_string(),
        msg: to_json_binary(&RegistryExecuteMsg::Mint {
            buyer: info.sender.to_string(),
            price: config.ticket_price,
        })?,
        funds: vec![],
    };

    let mut response = Response::new()
        .add_message(mint_msg)
        .add_attribute("action", "buy_ticket")
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("sequence", sequence.to_string());

    if campaign.tickets_sold == config.total_tickets {
        campaign.advance(CampaignStatus::Closed)?;
        campaign.closed_at_height = Some(env.block.height);
        response = response.add_event(campaign_closed_event(
            "sold_out",
            &campaign,
            env.block.height,
        ));
    }

    CAMPAIGN.save(deps.storage, &campaign)?;

    Ok(response.add_event(
        Event::new("raffle_ticket_issued")
            .add_attribute("buyer", info.sender.to_string())
            .add_attribute("sequence", sequence.to_string())
            .add_attribute("price", config.ticket_price.to_string())
            .add_attribute("tickets_sold", campaign.tickets_sold.to_string())
            .add_attribute("status", campaign.status.as_str()),
    ))
}

/// Record the winning ticket sequence numbers. Owner only, closed campaigns only.
pub fn set_winners(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    winners: Vec<u64>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut campaign = CAMPAIGN.load(deps.storage)?;
    let expired = campaign.close_if_expired(config.deadline, env.block.height);

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the campaign owner can set winners".to_string(),
        });
    }

    if campaign.status != CampaignStatus::Closed {
        return Err(ContractError::InvalidState {
            reason: format!(
                "winners can only be set on a closed campaign (status: {})",
                campaign.status
            ),
        });
    }

    if winners.len() as u64 != config.total_winners {
        return Err(ContractError::InvalidWinnerCount {
            expected: config.total_winners,
            got: winners.len() as u64,
        });
    }

    let mut seen = BTreeSet::new();
    for &sequence in &winners {
        if sequence == 0 || sequence > campaign.tickets_sold {
            return Err(ContractError::TicketNotFound { sequence });
        }
        if !seen.insert(sequence) {
            return Err(ContractError::DuplicateWinner { sequence });
        }
    }

    campaign.winners = winners;
    campaign.advance(CampaignStatus::WinnersSelected)?;
    CAMPAIGN.save(deps.storage, &campaign)?;

    let winners_str = campaign
        .winners
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let mut response = Response::new()
        .add_attribute("action", "set_winners")
        .add_attribute("winners", winners_str.clone());
    if expired {
        response = response.add_event(campaign_closed_event(
            "deadline",
            &campaign,
            env.block.height,
        ));
    }

    Ok(response.add_event(
        Event::new("raffle_winners_selected")
            .add_attribute("winners", winners_str)
            .add_attribute("total_winners", config.total_winners.to_string()),
    ))
}

/// Send the full held balance to `beneficiary`. Owner only.
///
/// The balance is zeroed and saved before the bank transfer is attached, so any
/// later call observes an empty balance. Withdrawing an empty balance succeeds
/// without a transfer.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the campaign owner can withdraw".to_string(),
        });
    }

    let beneficiary = deps.api.addr_validate(&beneficiary)?;

    let mut campaign = CAMPAIGN.load(deps.storage)?;
    let expired = campaign.close_if_expired(config.deadline, env.block.height);

    let amount = campaign.balance;
    campaign.balance = Uint128::zero();
    campaign.total_withdrawn = campaign.total_withdrawn.checked_add(amount)?;
    CAMPAIGN.save(deps.storage, &campaign)?;

    let mut response = Response::new()
        .add_attribute("action", "withdraw")
        .add_attribute("beneficiary", beneficiary.to_string())
        .add_attribute("amount", amount.to_string());

    if !amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: beneficiary.to_string(),
            amount: coins(amount.u128(), &config.denom),
        });
    }
    if expired {
        response = response.add_event(campaign_closed_event(
            "deadline",
            &campaign,
            env.block.height,
        ));
    }

    Ok(response.add_event(
        Event::new("raffle_funds_withdrawn")
            .add_attribute("beneficiary", beneficiary.to_string())
            .add_attribute("amount", amount.to_string())
            .add_attribute("denom", config.denom),
    ))
}

/// Persist the deadline close of an active campaign. Anyone can call.
pub fn close(deps: DepsMut, env: Env, _info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut campaign = CAMPAIGN.load(deps.storage)?;

    if !campaign.close_if_expired(config.deadline, env.block.height) {
        return Err(ContractError::InvalidState {
            reason: format!(
                "campaign cannot be closed (status: {}, deadline: {}, height: {})",
                campaign.status, config.deadline, env.block.height
            ),
        });
    }
    CAMPAIGN.save(deps.storage, &campaign)?;

    Ok(Response::new()
        .add_attribute("action", "close")
        .add_attribute("tickets_sold", campaign.tickets_sold.to_string())
        .add_event(campaign_closed_event(
            "deadline",
            &campaign,
            env.block.height,
        )))
}
