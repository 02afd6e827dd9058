use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: Option<&Path>, json: bool) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let variants = catalog.list_variants();

    if json {
        let out = serde_json::to_string_pretty(&variants).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Points", "Time", "Description"]);

    for v in &variants {
        table.add_row(vec![
            v.id.to_string(),
            v.name.clone(),
            v.points_per_unit.to_string(),
            format!("{}s", v.time_limit_seconds),
            v.description.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} games", variants.len());

    Ok(())
}
