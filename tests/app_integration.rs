use std::fs;
use tracing::info;

use fares::core::config::AppConfig;
use fares::core::{FareCatalog, FareCategory, FareTable, Money, quote, resolve_fare};

const CONFIG: &str = r#"
currency: "USD"
categories:
  - name: youth
    parent: student
  - name: pet
    global: true
fares:
  - id: metro
    agency_id: "AGN"
    agency_name: "Metro Transit"
    name: "Metro Fare"
    prices:
      regular: 250
      student: 150
      bicycle: 100
  - id: metro_weekend
    template: metro
    prices:
      pet: 25
    notes:
      - "Weekend pass for {name}"
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), content).expect("Failed to write config file");
    config_file
}

fn usd(cents: i64) -> Money {
    Money::new("USD".parse().unwrap(), cents)
}

#[test_log::test]
fn test_metro_fare_scenario() {
    let mut table = FareTable::with_agency("AGN", "Metro Fare");
    table.add_fare(FareCategory::Regular, usd(250));
    table.add_fare(FareCategory::Student, usd(150));
    table.add_fare(FareCategory::Bicycle, usd(100));

    assert_eq!(table.get_fare(&FareCategory::Regular), Some(&usd(250)));
    assert_eq!(table.get_fare(&FareCategory::Senior), None);
    assert_eq!(table.get_fare(&FareCategory::Bicycle), Some(&usd(100)));
    assert!(FareCategory::Bicycle.is_global());

    // The caller applies the fallback for seniors.
    let senior = resolve_fare(&table, &FareCategory::Senior).expect("senior falls back");
    assert_eq!(senior.source, FareCategory::Regular);
    assert_eq!(senior.money, usd(250));
    info!(%table, "Built metro fare");
}

#[test_log::test]
fn test_catalog_from_file() {
    let config_file = write_config(CONFIG);
    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");
    let catalog = FareCatalog::from_config(&config).expect("Failed to build catalog");

    let metro = catalog.get("metro").expect("metro fare");
    let weekend = catalog.get("metro_weekend").expect("weekend fare");

    assert!(metro.notes().is_none());
    assert_eq!(
        weekend.notes(),
        Some(&["Weekend pass for Metro Fare".to_string()][..])
    );

    let pet = catalog.registry().get("pet").unwrap();
    assert_eq!(metro.get_fare(&pet), None);
    assert_eq!(weekend.get_fare(&pet), Some(&usd(25)));

    let youth = catalog.registry().get("youth").unwrap();
    let result = quote(weekend, &youth, catalog.registry().globals())
        .unwrap()
        .expect("youth resolves through student");
    assert_eq!(result.base.source, FareCategory::Student);
    assert_eq!(result.total, usd(150 + 100 + 25));
}

#[test_log::test]
fn test_run_commands_with_config() {
    let config_file = write_config(CONFIG);
    let path = config_file.path().to_str().unwrap();

    for command in [
        fares::AppCommand::Show,
        fares::AppCommand::Categories,
        fares::AppCommand::Export,
        fares::AppCommand::Quote {
            fare: "metro".to_string(),
            category: "senior".to_string(),
        },
    ] {
        let result = fares::run_command(command, Some(path));
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }
}

#[test_log::test]
fn test_quote_reports_missing_price() {
    let config_file = write_config(
        r#"
currency: "USD"
fares:
  - id: bikes_only
    prices:
      bicycle: 100
"#,
    );
    let path = config_file.path().to_str().unwrap();

    let result = fares::run_command(
        fares::AppCommand::Quote {
            fare: "bikes_only".to_string(),
            category: "student".to_string(),
        },
        Some(path),
    );
    let err = result.expect_err("student has no price in the chain");
    assert!(err.to_string().contains("has no price for 'student'"));

    let result = fares::run_command(
        fares::AppCommand::Quote {
            fare: "missing".to_string(),
            category: "regular".to_string(),
        },
        Some(path),
    );
    assert!(result.unwrap_err().to_string().contains("Unknown fare: missing"));
}

#[test_log::test]
fn test_invalid_config_fails() {
    let config_file = write_config("currency: \"USD\"\nfares:\n  - id: a\n    template: nope\n");
    let result = fares::run_command(
        fares::AppCommand::Show,
        Some(config_file.path().to_str().unwrap()),
    );
    let err = result.expect_err("template must exist");
    assert!(format!("{err:#}").contains("template 'nope' must refer to an earlier fare"));
}
