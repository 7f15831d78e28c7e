//! Hue Lights Demo
//!
//! Starts a hive with the built-in factories, creates the bees listed in
//! `hive.toml` and sends a few actions to a Hue bee.  Requests go through the
//! dry-run bridge, so they are logged rather than sent.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package hue-lights -- --config demos/hue_lights/hive.toml
//! cargo run --package hue-lights -- --config demos/hue_lights/hive.toml --color "#ff8800" --stay
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hive::prelude::*;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Drives a Philips Hue bee through the hive")]
struct Args {
    /// Configuration file.
    #[arg(short, long, default_value = "hive.toml")]
    config: PathBuf,

    /// Bee to send actions to.
    #[arg(short, long, default_value = "living-room")]
    bee: String,

    /// Light number on the bridge.
    #[arg(short, long, default_value_t = 1)]
    light: i64,

    /// Color name or `#rrggbb`.
    #[arg(long, default_value = "orange")]
    color: String,

    /// Brightness, 0-254.
    #[arg(long, default_value_t = 200)]
    brightness: i64,

    /// Keep running and log bee events until Ctrl+C.
    #[arg(long)]
    stay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let hive = Hive::builder()
        .factories(builtin_factories())
        .config_file(&args.config)
        .build()
        .with_context(|| format!("failed to start hive from {}", args.config.display()))?;

    for factory in hive.factories() {
        info!(factory = %factory.id, name = %factory.name, "Available bee");
    }

    hive.start_bees().await;
    if hive.bee(&args.bee).is_none() {
        anyhow::bail!("bee '{}' is not configured in {}", args.bee, args.config.display());
    }

    let actions = [
        Action::new(
            &args.bee,
            "Philips Hue",
            "switch",
            Placeholders::new()
                .with("light", ValueType::Int, args.light)
                .with("state", ValueType::Bool, true),
        ),
        Action::new(
            &args.bee,
            "Philips Hue",
            "setcolor",
            Placeholders::new()
                .with("light", ValueType::Int, args.light)
                .with("color", ValueType::String, args.color.as_str())
                .with("brightness", ValueType::Int, args.brightness)
                .with("alert", ValueType::Int, 1),
        ),
    ];

    for action in actions {
        let name = action.name.clone();
        match hive.dispatch(action).await {
            Ok(_) => info!(action = %name, "Action sent"),
            Err(e) => error!(action = %name, error = %e, "Action failed"),
        }
    }

    if args.stay {
        hive.run().await?;
    }

    Ok(())
}
