//! Core types for cardpack user provisioning.
//!
//! This crate provides the foundational types shared across the provisioning
//! pipeline:
//!
//! - **Identifiers**: `AccountId`, `TransactionId`
//! - **Events**: `AccountCreated` (the identity provider's payload)
//! - **Records**: `UserRecord`, `BalanceRecord`, `TransactionRecord`
//! - **Ledger**: `NewTransaction`, `TransactionType`, `PaymentMethod`
//!
//! # Welcome Bonus
//!
//! Every newly provisioned user starts with **10 credits**, recorded three
//! ways: as `UserRecord::credit_balance`, as the singleton `BalanceRecord`,
//! and as one `signup_bonus` entry in the transaction ledger.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credits;
pub mod event;
pub mod ids;
pub mod user;

pub use credits::{
    BalanceRecord, NewTransaction, PaymentMethod, TransactionRecord, TransactionStatus,
    TransactionType, WELCOME_BONUS_DESCRIPTION,
};
pub use event::AccountCreated;
pub use ids::{AccountId, IdError, TransactionId};
pub use user::{NewUser, ProvisionedUser, UserRecord, SIGNUP_BONUS_CREDITS};
