use crate::core::{FareCatalog, FareTable};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ExportedFare<'a> {
    id: &'a str,
    #[serde(flatten)]
    table: &'a FareTable,
}

pub fn to_json(catalog: &FareCatalog) -> Result<String> {
    let fares: Vec<ExportedFare> = catalog
        .fares()
        .map(|(id, table)| ExportedFare { id, table })
        .collect();
    serde_json::to_string_pretty(&fares).context("Failed to serialize fares")
}

pub fn run(catalog: &FareCatalog) -> Result<()> {
    println!("{}", to_json(catalog)?);
    Ok(())
}
