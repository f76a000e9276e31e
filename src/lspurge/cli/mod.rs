//! # CLI Behavior
//!
//! This is **one possible UI client** for lspurge, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes
//! and output formatting.
//!
//! ## Configuration Lookup
//!
//! The first of these wins:
//!
//! 1. `--config <path>`
//! 2. `$LSPURGE_CONFIG`
//! 3. `./lspurge.json`
//! 4. `lspurge.json` in the user config directory
//!
//! With none present the defaults apply. `$LSPURGE_SITE_URL` and
//! `$LSPURGE_ENDPOINT` then override the file, and `--site-url` overrides
//! everything.
//!
//! ## Collaborators
//!
//! - Sites come from `sites_url` when set, otherwise from the `sites` list.
//! - Term ids are checked against the WordPress REST API under `rest_root`.
//! - Nonces come from `nonce_url` when set, otherwise from
//!   `$LSPURGE_NONCE_<ACTION>` / `$LSPURGE_NONCE`.
//!
//! ## Failure Output
//!
//! Messages a command produced are printed before its error. A refused purge
//! ends with `Error: Something went wrong! Got <status>`. An unknown blog id
//! prints the network listing first so the user can pick a valid one.

mod commands;
mod render;
mod setup;

pub use commands::run;
