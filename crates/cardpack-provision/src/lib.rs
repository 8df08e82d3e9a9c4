//! Account-created trigger for cardpack.
//!
//! The host platform invokes this function with an identity provider's
//! account-created payload. The handler ensures the user's records exist in
//! the document store: the primary user document, the singleton balance
//! sub-record, and one welcome-bonus ledger entry. Delivery is at-least-once,
//! so the whole operation is idempotent.
//!
//! The store is injected as `Arc<dyn DocumentStore>`; nothing in this crate
//! holds global mutable state. Process-wide initialization (tracing, config,
//! store open) happens once in `main`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod handler;
pub mod platform;

pub use config::ProvisionConfig;
pub use error::ProvisionError;
pub use handler::{ProvisionOutcome, UserProvisioningHandler};
pub use platform::Ack;
