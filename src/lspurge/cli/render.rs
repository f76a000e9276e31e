//! # Rendering
//!
//! Turns command results into terminal text. Each `render_*` function
//! returns a `String` and takes `use_color` so tests can compare plain
//! output; the `print_*` wrappers write colored text to stdout.

use colored::{Color, Colorize};
use lspurge::commands::{CmdMessage, MessageLevel};
use lspurge::model::SiteRecord;
use unicode_width::UnicodeWidthStr;

const SITE_LIST_HEADING: &str = "The list of installs:";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, true));
}

pub(super) fn print_site_list(sites: &[SiteRecord]) {
    print!("{}", render_site_list(sites, true));
}

pub(super) fn print_settings(settings: &[(&str, String)]) {
    print!("{}", render_settings(settings, true));
}

fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info if use_color => message.content.dimmed().to_string(),
            MessageLevel::Info => message.content.clone(),
            MessageLevel::Success => paint(&message.content, Color::Green, use_color),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One `<domain><path>: ID <blog_id>` line per site, under a heading.
fn render_site_list(sites: &[SiteRecord], use_color: bool) -> String {
    let mut out = paint(SITE_LIST_HEADING, Color::Cyan, use_color);
    out.push('\n');
    for site in sites {
        let address = format!("{}:", site.address());
        out.push_str(&format!(
            "{} ID {}\n",
            paint(&address, Color::Yellow, use_color),
            site.blog_id
        ));
    }
    out
}

/// `key = value` lines with the `=` signs aligned.
fn render_settings(settings: &[(&str, String)], use_color: bool) -> String {
    let key_width = settings
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, value) in settings {
        let padding = " ".repeat(key_width.saturating_sub(key.width()));
        out.push_str(&format!(
            "{}{} = {}\n",
            paint(key, Color::Yellow, use_color),
            padding,
            value
        ));
    }
    out
}

fn paint(text: &str, color: Color, use_color: bool) -> String {
    if use_color {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}
