use super::ui;
use crate::core::{FareCatalog, Quote, quote};
use anyhow::{Context, Result, bail};
use comfy_table::{Attribute, Cell};

pub fn render_quote(fare_name: &str, quote: &Quote) -> String {
    let mut table = ui::fare_grid(&["Component", "Category", "Price"]);

    let base_label = if quote.base.is_fallback() {
        let label = format!("{} (via {})", quote.base.requested, quote.base.source);
        ui::paint(&label, ui::Tone::Fallback)
    } else {
        quote.base.requested.to_string()
    };
    table.add_row(vec![
        Cell::new("Fare"),
        Cell::new(base_label),
        ui::price_cell(Some(&quote.base.money)),
    ]);
    for (category, money) in &quote.surcharges {
        table.add_row(vec![
            Cell::new(ui::paint("Surcharge", ui::Tone::Surcharge)),
            Cell::new(category.name()),
            ui::surcharge_cell(money),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        ui::total_cell(&quote.total),
    ]);

    format!(
        "Fare: {}\n\n{}\n\n{}: {}",
        ui::paint(fare_name, ui::Tone::Heading),
        table,
        ui::paint("Total", ui::Tone::Heading),
        ui::paint(&quote.total.to_string(), ui::Tone::Total)
    )
}

pub fn run(catalog: &FareCatalog, fare_id: &str, category_name: &str) -> Result<()> {
    let table = catalog
        .get(fare_id)
        .with_context(|| format!("Unknown fare: {fare_id}"))?;
    let category = catalog.registry().get(category_name)?;

    let Some(result) = quote(table, &category, catalog.registry().globals())? else {
        bail!("Fare '{fare_id}' has no price for '{category}' or any of its parents");
    };
    println!("{}", render_quote(table.name().unwrap_or(fare_id), &result));
    Ok(())
}
