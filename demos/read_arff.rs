//! Reads a small ARFF relation and prints its schema and records.
//!
//! Run with: cargo run --example read_arff

use arff_instances::{ArffReader, AttributeKind, ClassSelector, ReaderOptions};
use std::error::Error;

const INPUT: &str = "\
% Observations with a nominal class
@relation observations

@attribute outlook {sunny, overcast, rainy}
@attribute temperature numeric
@attribute observed date \"yyyy-MM-dd\"
@attribute play {yes, no}

@data
sunny, 85, 2024-06-01, no
overcast, ?, 2024-06-03, yes, {0.5}
{1 64, 2 2024-06-04, 3 yes}
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let options = ReaderOptions::new().with_class(ClassSelector::Last);
    let mut reader = ArffReader::with_options(INPUT.as_bytes(), options)?;

    let catalog = reader.catalog();
    println!("Relation: {}", catalog.relation());
    for attribute in catalog.attributes() {
        let detail = match attribute.kind() {
            AttributeKind::Nominal => attribute.labels().collect::<Vec<_>>().join(", "),
            AttributeKind::Date => attribute
                .date_pattern()
                .map(|p| p.pattern().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        println!("  {:<12} {:?} {}", attribute.name(), attribute.kind(), detail);
    }
    println!();

    while let Some(record) = reader.read_record()? {
        let shape = if record.is_sparse() { "sparse" } else { "dense" };
        println!(
            "{:<6} label={} weight={} values={:?}",
            shape,
            record.label(),
            record.weight(),
            record.to_dense()
        );
    }

    println!("\n{} records read", reader.records_read());
    Ok(())
}
