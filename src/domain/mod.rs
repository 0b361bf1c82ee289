//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types as the backend returns them
//! - `wire.rs` — Request bodies and auxiliary payloads, where a domain has them
//! - `client.rs` — Sub-client with one method per endpoint
//! - `state.rs` — App-owned state container mirroring the server resource
//!
//! `wallet` is read-only and has no state container.

pub mod market;
pub mod order;
pub mod position;
pub mod setting;
pub mod stats;
pub mod trading;
pub mod wallet;
