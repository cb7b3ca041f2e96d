//! `stockroom-service` — the gated programmatic contract.
//!
//! [`StockSystem`] is the front door for every caller: it authenticates
//! credentials into sessions, authorizes each operation against the central
//! policy, then delegates to the backing store. Presentation layers (CLI,
//! forms, whatever) sit on top of this crate and nothing else.

pub mod system;

pub use system::StockSystem;
