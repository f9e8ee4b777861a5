//! Configuration view and validation commands (`dialer config`).

use anyhow::Result;

use super::super::ConfigCommands;

fn print_sections(toml: &dialer::dialer_config::DialerToml) {
    println!("[backend]");
    println!("  base_url = \"{}\"", toml.backend.base_url);
    if let Some(secs) = toml.backend.request_timeout_secs {
        println!("  request_timeout_secs = {}", secs);
    }
    println!();
    println!("[calls]");
    println!("  max_parallel_calls = {}", toml.calls.max_parallel_calls);
    println!();
    println!("[customers]");
    println!("  name_field = \"{}\"", toml.customers.name_field);
    println!("  phone_field = \"{}\"", toml.customers.phone_field);
    println!();
}

pub fn cmd_config(project_dir: &std::path::Path, command: Option<ConfigCommands>) -> Result<()> {
    use dialer::dialer_config::{CONFIG_FILE, CliOverrides, DIALER_DIR, DialerConfig, DialerToml};

    let dialer_dir = project_dir.join(DIALER_DIR);
    let config_path = dialer_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Dialer Configuration");
            println!("====================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
                println!();
                print_sections(&DialerToml::load(&config_path)?);
            } else {
                println!("No dialer.toml found at {}", config_path.display());
                println!();
                println!("Using default configuration:");
                print_sections(&DialerToml::default());
                println!("Run 'dialer config init' to create a dialer.toml file.");
                println!();
            }

            println!("Effective values (with env overrides):");
            let config = DialerConfig::resolve(project_dir, &CliOverrides::default())?;
            println!("  backend_url = \"{}\"", config.backend_url);
            println!("  max_parallel_calls = {}", config.max_parallel_calls);
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No dialer.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = DialerToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("dialer.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !dialer_dir.exists() {
                std::fs::create_dir_all(&dialer_dir)?;
            }

            DialerToml::default().save(&config_path)?;

            println!("Created dialer.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [backend] base_url, request_timeout_secs");
            println!("  - [calls] max_parallel_calls");
            println!("  - [customers] name_field, phone_field");
            println!();
        }
    }

    Ok(())
}
