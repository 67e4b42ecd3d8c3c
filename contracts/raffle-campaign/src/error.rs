use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("invalid campaign config: {reason}")]
    InvalidConfig { reason: String },

    #[error("payment must equal the ticket price: expected {expected}, received {received}")]
    InsufficientPayment { expected: Uint128, received: Uint128 },

    #[error("must pay in the campaign denom, got {denom}")]
    WrongDenom { denom: String },

    #[error("must send at most one coin")]
    InvalidFunds,

    #[error("all tickets have been sold")]
    SoldOut,

    #[error("expected {expected} winning tickets, got {got}")]
    InvalidWinnerCount { expected: u64, got: u64 },

    #[error("ticket {sequence} was not sold in this campaign")]
    TicketNotFound { sequence: u64 },

    #[error("ticket {sequence} appears more than once in the winners")]
    DuplicateWinner { sequence: u64 },
}
