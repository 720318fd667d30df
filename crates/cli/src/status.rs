use mgcbsync_core::{ContentSync, SyncConfig};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Importer")]
    importer: String,
    #[tabled(rename = "Processor")]
    processor: String,
}

pub fn run(config: SyncConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sync = ContentSync::new(config)?;
    let plan = sync.plan()?;

    println!("Content Directory: {}", sync.config().content_dir.display());
    println!("MGCB File:         {}", sync.mgcb_path().display());
    println!("Registered:        {}", plan.registered.len());
    println!("Discovered:        {}", plan.discovered.len());
    println!("Pending:           {}", plan.pending.len());

    let rows: Vec<PendingRow> = plan
        .pending
        .iter()
        .filter_map(|asset| {
            let group = sync.table().group_for(asset)?;
            Some(PendingRow {
                path: asset.clone(),
                group: group.name.clone(),
                importer: group.importer.clone(),
                processor: group.processor.clone(),
            })
        })
        .collect();

    if rows.is_empty() {
        println!("\nnothing new");
    } else {
        println!("\n{}", Table::new(rows));
    }

    Ok(())
}
