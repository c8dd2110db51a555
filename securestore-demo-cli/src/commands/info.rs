//! Info command

use anyhow::Result;

use super::{default_config_path, DemoStore};
use crate::ui;

pub fn run(store: &DemoStore, memory: bool, verbose: bool) -> Result<()> {
    let config = store.config();

    ui::header("Secret Store");
    ui::key_value("Backend", store.vault().backend_name());
    ui::key_value("Resource", store.resource());
    ui::key_value("Serialize access", &config.serialize_access.to_string());
    ui::key_value(
        "Restore on failed set",
        &config.restore_on_failed_set.to_string(),
    );
    if let Some(path) = default_config_path() {
        ui::key_value("Default config", &path.display().to_string());
    }

    if verbose {
        ui::header("Effective config");
        println!("{}", serde_json::to_string_pretty(config)?);
    }

    if memory {
        ui::warning("In-memory vault: secrets are discarded when the command exits");
    }
    Ok(())
}
