//! # lspurge Architecture
//!
//! lspurge asks a WordPress install running LiteSpeed Cache to drop cached
//! pages. It is a **library that happens to have a CLI client**: the binary
//! only parses arguments and prints, everything else is reachable from
//! [`api::PurgeApi`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, loads config, prints, sets exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - validate → build request → dispatch → CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators                                              │
//! │  - SiteDirectory: which blogs exist (directory/)            │
//! │  - TermLookup: which tags/categories/posts exist            │
//! │  - NonceProvider: per-action anti-forgery tokens            │
//! │  - Transport: HTTP GET (ureq in production)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## A Purge, End to End
//!
//! 1. [`validate`] turns raw arguments into a [`model::PurgeTarget`], or fails
//!    without touching the network.
//! 2. [`request`] picks the action (`PURGE_ALL`, `PURGE`, `PURGE_BY`) and the
//!    route: the admin-ajax endpoint with a nonce, or the page URL itself.
//! 3. [`dispatch`] sends it and classifies the JSON answer into a
//!    [`model::PurgeResult`].
//!
//! A blog purge runs against a [`model::RequestContext`] derived for that
//! blog. Contexts are values; there is no "current blog" to restore.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: behavior, against `StaticDirectory`, `StaticLookup` and
//!    [`transport::fixtures::RecordingTransport`].
//! 2. **API**: dispatch only.
//! 3. **CLI**: argument parsing and rendering, plus `tests/` running the
//!    binary against configs written to temp dirs.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per purge command
//! - [`validate`]: Argument validation
//! - [`request`]: Request construction
//! - [`dispatch`]: Sending and response classification
//! - [`directory`]: Site registry abstraction and implementations
//! - [`lookup`]: Term existence checks
//! - [`nonce`]: Nonce providers
//! - [`transport`]: HTTP abstraction
//! - [`model`]: Core data types
//! - [`config`]: Configuration loading
//! - [`logging`]: tracing setup for binaries
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod nonce;
pub mod request;
pub mod transport;
pub mod validate;
