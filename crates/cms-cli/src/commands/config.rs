//! Config commands

use std::path::Path;

use cms_forms::FormsConfig;

use crate::output::OutputFormat;
use crate::ConfigCommands;

pub fn handle(
    action: ConfigCommands,
    config: &FormsConfig,
    path: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Init => {
            let written = FormsConfig::default().save(path)?;
            println!("Config written to {}", written.display());
        }
        ConfigCommands::Show => match format {
            OutputFormat::Json => OutputFormat::print_json(config)?,
            OutputFormat::Table => {
                println!("data_dir                        = {}", config.data_dir.display());
                println!("log_level                       = {}", config.log_level);
                println!("preserve_field_name_overrides   = {}", config.preserve_field_name_overrides);
                println!("reject_duplicate_option_values  = {}", config.reject_duplicate_option_values);
            }
        },
    }
    Ok(())
}
