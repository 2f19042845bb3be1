//! CLI commands
//!
//! Each command maps onto one pipeline operation. Commands that print return the text to
//! print; commands that write files return `None`.

use actions_config::ActionsConfig;
use collective_actions::flat::to_csv_string;
use collective_actions::pipeline;
use tracing::info;

/// Output formats of `show`
pub const SHOW_FORMATS: &[&str] = &["json", "csv"];

/// Execute a named command against the configured files
pub fn execute_command(
    name: &str,
    config: &ActionsConfig,
    format: &str,
) -> Result<Option<String>, String> {
    let id = config.project.id.as_str();
    let paths = &config.paths;

    match name {
        "to-csv" => {
            pipeline::save_document_table_to_csv(&paths.document, &paths.csv, id)
                .map_err(|e| format!("Export failed: {}", e))?;
            info!(csv = %paths.csv.display(), "exported table");
            Ok(None)
        }
        "show" => {
            let table = pipeline::table_from_document(&paths.document, id)
                .map_err(|e| format!("Reading table failed: {}", e))?;
            let text = match format {
                "json" => serde_json::to_string_pretty(&table)
                    .map_err(|e| format!("JSON serialization failed: {}", e))?,
                "csv" => to_csv_string(&table).map_err(|e| format!("CSV serialization failed: {}", e))?,
                other => return Err(format!("Unknown format '{}'", other)),
            };
            Ok(Some(text))
        }
        "clean" => {
            pipeline::clean_document(&paths.document, id)
                .map_err(|e| format!("Cleaning failed: {}", e))?;
            Ok(None)
        }
        "render-sources" => {
            let table = pipeline::table_from_provider(&config.source_provider())
                .map_err(|e| format!("Reading sources failed: {}", e))?;
            pipeline::save_table_to_document(table, &paths.document, id)
                .map_err(|e| format!("Rendering failed: {}", e))?;
            Ok(None)
        }
        "render-csv" => {
            let table = pipeline::table_from_csv_file(&paths.csv)
                .map_err(|e| format!("Reading CSV failed: {}", e))?;
            pipeline::save_table_to_document(table, &paths.document, id)
                .map_err(|e| format!("Rendering failed: {}", e))?;
            Ok(None)
        }
        other => Err(format!("Unknown command '{}'", other)),
    }
}
