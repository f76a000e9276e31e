//! # lspurge
//!
//! Command-line client for the LiteSpeed Cache purge endpoint of a
//! WordPress install. See the library crate docs for the architecture; this
//! binary is only the CLI layer:
//!
//! - **Input**: clap parsing (`cli/setup.rs`), config loading and
//!   collaborator wiring (`cli/commands.rs`).
//! - **Output**: colored terminal rendering of `CmdResult` (`cli/render.rs`).
//! - **Exit**: `0` on success, `1` with `Error: <message>` on stderr.
//!
//! Tests follow the layers: CLI unit tests cover parsing and rendering,
//! `tests/` drives the built binary with temp config files.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
