//! Typed per-operation parameter records for the bundled blocks.
//!
//! Each request type is a discriminated union tagged by the backend-operation
//! identifier, built from [`crate::resolve::ResolvedParameters::into_typed`].

pub mod discord;
pub mod wealthbox;

pub use discord::DiscordRequest;
pub use wealthbox::WealthboxRequest;
