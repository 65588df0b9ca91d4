//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    let config = &ctx.config;

    ctx.output.blank();
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &config.storage.dir);
    ctx.output.kv("resolved", &ctx.storage_dir().display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);

    ctx.output.blank();
    ctx.output.info("[latency]");
    ctx.output.kv("enabled", &config.latency.enabled.to_string());
    ctx.output.kv("lookup", &format!("{}ms", config.latency.lookup));
    ctx.output.kv("list", &format!("{}ms", config.latency.list));
    ctx.output.kv("search", &format!("{}ms", config.latency.search));
    ctx.output.kv("write", &format!("{}ms", config.latency.write));

    ctx.output.blank();
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("{}", path.display()),
        None => {
            ctx.output.info(&format!(
                "No config file found (looked for {}). Using defaults.",
                CONFIG_NAMES.join(", ")
            ));
            ctx.output.info("Run `artisan config init` to create one.");
        }
    }
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
