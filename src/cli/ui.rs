//! Terminal rendering helpers shared by the fare commands

use crate::core::{Money, ResolvedFare};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// How a piece of fare text should stand out.
pub enum Tone {
    Heading,
    Fallback,
    Surcharge,
    Total,
    Muted,
}

pub fn paint(text: &str, tone: Tone) -> String {
    let styled = match tone {
        Tone::Heading => style(text).bold().underlined(),
        Tone::Fallback => style(text).yellow(),
        Tone::Surcharge => style(text).magenta(),
        Tone::Total => style(text).green().bold(),
        Tone::Muted => style(text).dim(),
    };
    styled.to_string()
}

/// A table with the given column headings.
pub fn fare_grid(headings: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headings.iter().map(|h| {
            Cell::new(h)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

/// A directly recorded price, or a dim "none" when the category is unpriced.
pub fn price_cell(money: Option<&Money>) -> Cell {
    match money {
        Some(m) => Cell::new(m).set_alignment(CellAlignment::Right),
        None => Cell::new("none")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// A resolved price; prices borrowed from a parent category are highlighted.
pub fn resolved_cell(resolved: Option<&ResolvedFare>) -> Cell {
    let Some(r) = resolved else {
        return price_cell(None);
    };
    if r.is_fallback() {
        Cell::new(format!("{} (via {})", r.money, r.source))
            .fg(Color::Yellow)
            .set_alignment(CellAlignment::Right)
    } else {
        price_cell(Some(&r.money))
    }
}

pub fn surcharge_cell(money: &Money) -> Cell {
    Cell::new(format!("+{money}"))
        .fg(Color::Magenta)
        .set_alignment(CellAlignment::Right)
}

pub fn total_cell(money: &Money) -> Cell {
    Cell::new(money)
        .fg(Color::Green)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

pub fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}

/// A rule between fare tables, as wide as the terminal.
pub fn fare_separator() -> String {
    let width = console::Term::stdout()
        .size_checked()
        .map_or(80, |(_, w)| usize::from(w));
    paint(&"═".repeat(width), Tone::Muted)
}
