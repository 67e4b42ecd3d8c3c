use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use raffle_common::Ticket;

pub const NEXT_TICKET_ID: Item<u64> = Item::new("next_ticket_id");
pub const TICKETS: Map<u64, Ticket> = Map::new("tickets");
/// Last sequence number issued to each campaign.
pub const CAMPAIGN_SEQ: Map<&Addr, u64> = Map::new("campaign_seq");
/// (campaign, sequence) -> ticket id
pub const CAMPAIGN_TICKETS: Map<(&Addr, u64), u64> = Map::new("campaign_tickets");
/// (holder, ticket id) index, append-only like the tickets themselves
pub const HOLDER_TICKETS: Map<(&Addr, u64), ()> = Map::new("holder_tickets");
