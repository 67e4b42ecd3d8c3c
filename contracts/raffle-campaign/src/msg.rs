use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use raffle_common::CampaignStatus;

use crate::state::CampaignConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub description: String,
    /// Block height after which the campaign stops selling tickets
    pub deadline: u64,
    pub ticket_price: Uint128,
    pub denom: String,
    pub total_tickets: u64,
    pub total_winners: u64,
    /// Address of the raffle-ticket registry contract
    pub ticket_registry: String,
    /// Defaults to the instantiating sender
    pub owner: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Buy one ticket. Send exactly the ticket price in info.funds.
    BuyTicket {},
    /// Record the winning ticket sequence numbers. Owner only.
    SetWinners { winners: Vec<u64> },
    /// Send the whole held balance to `beneficiary`. Owner only.
    Withdraw { beneficiary: String },
    /// Close an active campaign whose deadline has passed. Anyone can call.
    Close {},
}

/// Message sent to the ticket registry to mint a ticket.
/// Mirrors the registry's own ExecuteMsg::Mint.
#[cw_serde]
pub enum RegistryExecuteMsg {
    Mint { buyer: String, price: Uint128 },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CampaignConfig)]
    Config {},
    #[returns(CampaignStatus)]
    CampaignState {},
    #[returns(Uint128)]
    ContractBalance {},
    #[returns(u64)]
    TotalTickets {},
    #[returns(u64)]
    TicketsBought {},
    #[returns(CampaignResponse)]
    Campaign {},
    #[returns(WinnersResponse)]
    Winners {},
    #[returns(PurchasesResponse)]
    Purchases {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct CampaignResponse {
    pub name: String,
    pub description: String,
    pub owner: Addr,
    pub deadline: u64,
    pub ticket_price: Uint128,
    pub denom: String,
    pub total_tickets: u64,
    pub total_winners: u64,
    pub tickets_sold: u64,
    pub balance: Uint128,
    pub total_withdrawn: Uint128,
    pub status: CampaignStatus,
    /// Height at which the campaign sold out or passed its deadline
    pub closed_at_height: Option<u64>,
}

#[cw_serde]
pub struct WinnerEntry {
    pub sequence: u64,
    pub holder: Addr,
}

#[cw_serde]
pub struct WinnersResponse {
    pub winners: Vec<WinnerEntry>,
}

#[cw_serde]
pub struct PurchaseEntry {
    pub sequence: u64,
    pub buyer: Addr,
}

#[cw_serde]
pub struct PurchasesResponse {
    pub purchases: Vec<PurchaseEntry>,
}
