use super::ui;
use crate::core::{CategoryRegistry, FareCatalog, FareTable, resolve_fare};
use comfy_table::Cell;

/// Renders one fare table with direct and resolved prices per category.
pub fn render_fare(id: &str, table: &FareTable, registry: &CategoryRegistry) -> String {
    let mut grid = ui::fare_grid(&["Category", "Parent", "Global", "Price", "Resolved"]);

    for category in registry.categories() {
        let resolved = resolve_fare(table, category);
        grid.add_row(vec![
            Cell::new(category.name()),
            Cell::new(category.parent().map_or("-".to_string(), |p| p.to_string())),
            ui::flag_cell(category.is_global()),
            ui::price_cell(table.get_fare(category)),
            ui::resolved_cell(resolved.as_ref()),
        ]);
    }

    let title = table.name().unwrap_or(id);
    let mut output = format!("Fare: {} ({id})\n", ui::paint(title, ui::Tone::Heading));
    if let Some(agency) = table.agency_id() {
        let agency_name = table.agency_name().unwrap_or_default();
        output.push_str(&format!("Agency: {agency} {agency_name}\n"));
    }
    output.push('\n');
    output.push_str(&grid.to_string());

    if let Some(notes) = table.notes()
        && !notes.is_empty()
    {
        output.push_str("\n\nNotes:");
        for note in notes {
            output.push_str(&format!("\n  - {note}"));
        }
    }
    output
}

pub fn run(catalog: &FareCatalog) -> anyhow::Result<()> {
    let count = catalog.fares().count();
    if count == 0 {
        println!("No fares configured.");
        return Ok(());
    }

    for (i, (id, table)) in catalog.fares().enumerate() {
        println!("{}", render_fare(id, table, catalog.registry()));
        if i < count - 1 {
            println!("\n{}", ui::fare_separator());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FareCategory, Money};

    #[test]
    fn test_render_fare_shows_fallback_and_notes() {
        let mut table = FareTable::with_agency("AGN", "Metro Fare");
        table.add_fare(FareCategory::Regular, Money::new("USD".parse().unwrap(), 250));
        let table = table.add_note("Valid 90 minutes").into_owned();

        let output = render_fare("metro", &table, &CategoryRegistry::new());
        assert!(output.contains("metro"));
        assert!(output.contains("Agency: AGN"));
        assert!(output.contains("2.50 USD (via regular)"));
        assert!(output.contains("- Valid 90 minutes"));
        assert!(output.contains("none"));
    }
}
