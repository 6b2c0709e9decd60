use super::ui;
use crate::core::CategoryRegistry;
use comfy_table::Cell;

pub fn render_categories(registry: &CategoryRegistry) -> String {
    let mut table = ui::fare_grid(&["Category", "Falls back to", "Global"]);

    for category in registry.categories() {
        let chain: Vec<String> = category.lineage().skip(1).map(|c| c.to_string()).collect();
        let fallback = if chain.is_empty() {
            ui::paint("-", ui::Tone::Muted)
        } else {
            chain.join(" → ")
        };
        table.add_row(vec![
            Cell::new(category.name()),
            Cell::new(fallback),
            ui::flag_cell(category.is_global()),
        ]);
    }
    table.to_string()
}

pub fn run(registry: &CategoryRegistry) -> anyhow::Result<()> {
    println!("{}", render_categories(registry));
    Ok(())
}
