//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `hourfolio_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;

use hourfolio_core::db::open_db_in_memory;
use hourfolio_core::StoreContext;

fn main() -> Result<(), Box<dyn Error>> {
    // In-memory database: the probe must not touch the filesystem.
    let conn = open_db_in_memory()?;
    let stores = StoreContext::load(&conn)?;

    println!("hourfolio_core version={}", hourfolio_core::core_version());
    println!(
        "stores projects={} time_boxes={} time_logs={}",
        stores.projects.len(),
        stores.time_boxes.len(),
        stores.time_logs.len()
    );
    Ok(())
}
