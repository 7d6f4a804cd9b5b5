//! Config command handler

use super::confirm;
use crate::args::ConfigSubcommand;
use course_planner::config::Config;

/// Dispatch config subcommands against the stored (un-overridden) config
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            println!("\nFile: {}", Config::get_config_file_path().display());
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("Unknown config key: '{key}'");
                std::process::exit(1);
            }
        },
        Some(ConfigSubcommand::Set { key, value }) => {
            update(config, |c| c.set(&key, &value));
            if key == "user" {
                println!("✓ Signed in as {}", value.trim());
            } else {
                println!("✓ Set {key} = {value}");
            }
        }
        Some(ConfigSubcommand::Unset { key }) => {
            update(config, |c| c.unset(&key, defaults));
            println!("✓ Reset {key} to default");
        }
        Some(ConfigSubcommand::Reset) => handle_reset(),
    }
}

/// Apply an edit and save, exiting on either failure
fn update(config: &mut Config, edit: impl FnOnce(&mut Config) -> Result<(), String>) {
    if let Err(e) = edit(config) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }
}

fn handle_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if !confirm("Reset config to defaults? The signed-in user is forgotten.") {
        println!("✗ Reset cancelled");
        return;
    }
    if let Err(e) = Config::reset() {
        eprintln!("✗ Failed to remove config file: {e}");
        std::process::exit(1);
    }
    println!("✓ Config reset to defaults");
}
