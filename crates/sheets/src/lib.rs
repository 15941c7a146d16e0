//! Google Sheets append client for finished annotation records.
//!
//! The only durable store in the system is a shared spreadsheet; this crate
//! owns everything needed to reach it:
//!
//! - [`ServiceAccountKey`] — service-account credential loading.
//! - [`auth::TokenProvider`] — OAuth2 JWT-bearer token flow, authenticated
//!   once per process (lazily, cached until shortly before expiry).
//! - [`SheetsClient`] — `values:append` / `values:get` REST calls.
//! - [`SheetWriter`] — the single accessor handlers go through, with
//!   substitutable backends (Google, in-memory, disabled).

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod writer;

pub use client::SheetsClient;
pub use credentials::ServiceAccountKey;
pub use error::SheetsError;
pub use writer::{MemorySheet, SheetWriter};
