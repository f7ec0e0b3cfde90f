use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load_or_default();
            let yaml = serde_yaml::to_string(&config)?;
            println!("{}", "Current configuration:".bold());
            print!("{yaml}");
            let path = Config::path()?;
            println!("{} {}", "Location:".dimmed(), path.display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!("{} {key} = {value}", "Saved".green());
            println!("{} {}", "Location:".dimmed(), path.display());
            Ok(())
        }
    }
}
