// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for kbsearch CLI output.
//!
//! OneDark colors on dark terminals, One Light on light ones. `KBSEARCH_THEME`
//! forces a theme, otherwise `COLORFGBG` is consulted, otherwise dark.
//! Colors are off when `NO_COLOR` is set or stdout isn't a TTY, so piped
//! output stays plain text.

use kbsearch::{HighlightTags, IndexStats, QueryResult, SyntaxError};
use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("KBSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background 7 and up (except 8) is a light terminal.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(RED);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers when colors are on, plain text otherwise.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible width, ANSI escapes excluded.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Tags that render matches as bold yellow on a color terminal.
///
/// `None` when colors are off: the caller keeps whatever tags it asked for.
pub fn terminal_highlight_tags() -> Option<HighlightTags> {
    use_colors().then(|| HighlightTags {
        pre: format!("{}{}", BOLD, YELLOW()),
        post: RESET.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        border(&label_part),
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Cut `text` to `max` visible chars, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_results(query: &str, results: &[QueryResult<'_>], total: usize, errors: &[SyntaxError]) {
    section_top(&format!("SEARCH \"{}\"", truncate(query, 40)));

    for err in errors {
        row(&format!(" {} {}", themed(RED, &[BOLD], "!"), err));
    }

    if results.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for (rank, result) in results.iter().enumerate() {
        let doc = result.document;
        let header = format!(
            " {:>2}. {} {} {}",
            rank + 1,
            themed(GREEN, &[BOLD], &truncate(&doc.title, 44)),
            themed(GRAY, &[], &format!("[{} {}]", doc.kind, truncate(&doc.id, 16))),
            themed(CYAN, &[], &format!("{:.4}", result.score)),
        );
        row(&header);
        for highlight in &result.highlights {
            for fragment in &highlight.fragments {
                // Fragments may carry escape codes; don't truncate through them.
                let line = fragment.replace('\n', " ");
                row(&format!("     {} {}", themed(GRAY, &[DIM], highlight.field.as_str()), line));
            }
        }
    }

    row(&themed(
        GRAY,
        &[DIM],
        &format!(" {} shown of {} matching", results.len(), total),
    ));
    section_bot();
}

pub fn print_suggestions(prefix: &str, suggestions: &[String]) {
    section_top(&format!("SUGGEST \"{}\"", truncate(prefix, 40)));
    if suggestions.is_empty() {
        row(&themed(GRAY, &[DIM], " no suggestions"));
    }
    for term in suggestions {
        row(&format!(" {}", themed(GREEN, &[], term)));
    }
    section_bot();
}

pub fn print_stats(stats: &IndexStats) {
    section_top("INDEX");
    row(&format!(" documents      {}", stats.total_documents));
    row(&format!(" terms          {}", stats.total_terms));
    row(&format!(" postings       {}", stats.index_size));
    row(&format!(" avg body chars {:.1}", stats.average_document_size));
    section_bot();
}
