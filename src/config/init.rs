use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config};
use crate::ranking::{validate_balanced, Weights};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt for one weight until a non-negative number is entered.
fn prompt_weight(label: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(label, &default.to_string())?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            _ => println!("  Invalid: must be a non-negative number. Try again."),
        }
    }
}

/// Prompt for all three weights until they add up to 100.
fn prompt_weights(defaults: Weights) -> Result<Weights> {
    println!("Weights are percentages and must add up to 100.");
    loop {
        let weights = Weights::new(
            prompt_weight("Profit weight (benefit)", defaults.profit)?,
            prompt_weight("Sales weight (benefit)", defaults.sales)?,
            prompt_weight("Cost weight (cost)", defaults.cost)?,
        );
        match validate_balanced(&weights) {
            Ok(()) => return Ok(weights),
            Err(errors) => {
                for error in errors {
                    println!("  Invalid: {}. Try again.", error);
                }
            }
        }
    }
}

/// Write a config file, creating parent directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Create a config file.
///
/// With `accept_defaults` the built-in weights are written without prompting
/// and an existing file is overwritten only when `force` is set.
pub fn run_init(path: Option<PathBuf>, accept_defaults: bool, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        if accept_defaults {
            anyhow::bail!(
                "Config already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        let overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            anyhow::bail!("Aborted.");
        }
    }

    let weights = if accept_defaults {
        Weights::default()
    } else {
        println!("saw-rank configuration");
        println!("======================");
        prompt_weights(Weights::default())?
    };

    let config = Config {
        store: None,
        user: None,
        weights: Some(weights),
    };
    write_config(&config_path, &config)?;
    tracing::info!(path = %config_path.display(), "config written");

    Ok(config_path)
}
