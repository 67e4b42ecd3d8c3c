use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use raffle_common::Ticket;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint a ticket bound to the calling campaign contract.
    Mint {
        /// Address the ticket is issued to
        buyer: String,
        /// Price the buyer paid to the campaign
        price: Uint128,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Campaign a ticket is bound to. Fails for unknown ids.
    #[returns(Addr)]
    CampaignId { ticket_id: u64 },

    /// Price paid for a ticket. Fails for unknown ids.
    #[returns(Uint128)]
    Price { ticket_id: u64 },

    #[returns(Ticket)]
    Ticket { ticket_id: u64 },

    #[returns(Option<Ticket>)]
    TicketBySequence { campaign: String, sequence: u64 },

    #[returns(TicketsResponse)]
    TicketsByHolder {
        holder: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Tickets of one campaign ordered by sequence number.
    #[returns(TicketsResponse)]
    CampaignTickets {
        campaign: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(u64)]
    TotalMinted {},
}

#[cw_serde]
pub struct TicketsResponse {
    pub tickets: Vec<Ticket>,
}
