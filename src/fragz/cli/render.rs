//! # Rendering
//!
//! Turns `CmdResult` pieces into terminal text. Every renderer returns a
//! `String` so the shell can write to any sink and tests can compare output.
//! Color is applied by `colored` and can be switched off per call; the
//! `*_internal` variants take that switch explicitly.
//!
//! Widths are measured with `unicode-width` so wide characters in names and
//! previews keep the columns aligned.

use colored::{ColoredString, Colorize};
use fragz::api::{CmdMessage, ListedFragment, MessageLevel, PageInfo};
use fragz::config::{FragzConfig, CONFIG_KEYS};
use fragz::model::{Fragment, FragmentMeta};
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const POSITION_WIDTH: usize = 6;
const WORDS_WIDTH: usize = 12;
const OK_MARKER: &str = "✓";
const OFF_MARKER: &str = "✗";

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(text: &str, color: bool, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Renders a page of fragments followed by the `Page X of Y` footer.
pub fn render_fragment_list(listed: &[ListedFragment], page: Option<PageInfo>) -> String {
    render_fragment_list_internal(listed, page, use_color())
}

fn render_fragment_list_internal(
    listed: &[ListedFragment],
    page: Option<PageInfo>,
    color: bool,
) -> String {
    let mut out = String::new();
    if listed.is_empty() {
        out.push_str("No fragments loaded.\n");
    }

    let name_width = listed
        .iter()
        .map(|l| l.fragment.display_name.width())
        .max()
        .unwrap_or(0);

    for l in listed {
        let position = format!("{:>width$}. ", l.position, width = POSITION_WIDTH - 2);
        let name = &l.fragment.display_name;
        let name_padding = " ".repeat(name_width.saturating_sub(name.width()));
        let words = format!("{:>width$}", word_label(l.fragment.word_count), width = WORDS_WIDTH);

        let fixed = POSITION_WIDTH + name_width + WORDS_WIDTH + 2;
        let preview = truncate_to_width(&one_line(&l.fragment.content), LINE_WIDTH.saturating_sub(fixed));

        out.push_str(&format!(
            "{}{}{}  {}{}\n",
            paint(&position, color, |s| s.yellow()),
            paint(name, color, |s| s.bold()),
            name_padding,
            preview,
            paint(&words, color, |s| s.dimmed()),
        ));
    }

    if let Some(info) = page {
        out.push_str(&paint(&page_footer(&info), color, |s| s.dimmed()));
        out.push('\n');
    }
    out
}

/// `Page X of Y (N fragments)`, with a 1-based page number.
pub fn page_footer(info: &PageInfo) -> String {
    format!(
        "Page {} of {} ({} fragment{})",
        info.current + 1,
        info.total,
        info.total_fragments,
        if info.total_fragments == 1 { "" } else { "s" }
    )
}

/// Renders a single fragment in full.
pub fn render_full_fragment(fragment: &Fragment) -> String {
    render_full_fragment_internal(fragment, use_color())
}

fn render_full_fragment_internal(fragment: &Fragment, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        paint(&fragment.display_name, color, |s| s.bold()),
        paint(
            &format!("({}, {})", fragment.id, word_label(fragment.word_count)),
            color,
            |s| s.dimmed()
        )
    ));
    out.push_str("--------------------------------\n");
    out.push_str(&fragment.content);
    out.push('\n');
    out
}

/// Summarizes the pieces produced by a split, one line each.
pub fn render_derived(derived: &[FragmentMeta]) -> String {
    render_derived_internal(derived, use_color())
}

fn render_derived_internal(derived: &[FragmentMeta], color: bool) -> String {
    let mut out = String::new();
    for (i, meta) in derived.iter().enumerate() {
        let marker = if meta.is_successful {
            paint(OK_MARKER, color, |s| s.green())
        } else {
            paint(OFF_MARKER, color, |s| s.red())
        };
        let words = format!("{:>width$}", word_label(meta.word_count), width = WORDS_WIDTH);
        let fixed = POSITION_WIDTH + 2 + WORDS_WIDTH + 2;
        let preview = truncate_to_width(&one_line(&meta.text), LINE_WIDTH.saturating_sub(fixed));
        out.push_str(&format!(
            "{:>width$}. {} {}  {}\n",
            i + 1,
            marker,
            paint(&words, color, |s| s.dimmed()),
            preview,
            width = POSITION_WIDTH - 2
        ));
    }
    out
}

/// `key = value` for every config key.
pub fn render_config(config: &FragzConfig) -> String {
    CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, use_color())
}

fn render_messages_internal(messages: &[CmdMessage], color: bool) -> String {
    messages
        .iter()
        .map(|m| {
            let line = match m.level {
                MessageLevel::Info => paint(&m.content, color, |s| s.dimmed()),
                MessageLevel::Success => paint(&m.content, color, |s| s.green()),
                MessageLevel::Warning => paint(&m.content, color, |s| s.yellow()),
                MessageLevel::Error => paint(&m.content, color, |s| s.red()),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn word_label(count: usize) -> String {
    format!("{} word{}", count, if count == 1 { "" } else { "s" })
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    if s.width() <= max_width {
        let padding = " ".repeat(max_width - s.width());
        return format!("{}{}", s, padding);
    }

    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    current_width += 1;
    result.push_str(&" ".repeat(max_width.saturating_sub(current_width)));
    result
}
