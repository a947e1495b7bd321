use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sharecard::{compose_card, rendering, CardConfig, MainResult, StatEntry};

/// Render a themed share card to a PNG file.
#[derive(Parser)]
#[command(name = "sharecard")]
struct Cli {
    /// JSON card configuration; omit to render a built-in demo card
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, default_value = "card.png")]
    out: PathBuf,

    /// Override the configured theme
    #[arg(long)]
    theme: Option<String>,
}

fn demo_config() -> CardConfig {
    CardConfig {
        tool_name: "DECISION BATTLE".to_string(),
        icon: Some("!".to_string()),
        theme: "red".to_string(),
        main_result: Some(MainResult {
            label: "Victory!".to_string(),
            value: "Choice A".to_string(),
            sublabel: Some("after 12 rounds".to_string()),
        }),
        stats: vec![
            StatEntry {
                value: "12".to_string(),
                label: "rounds".to_string(),
            },
            StatEntry {
                value: "5".to_string(),
                label: "contenders".to_string(),
            },
        ],
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => demo_config(),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let card = compose_card(&config);
    let shot = rendering::capture(&card)?;
    std::fs::write(&cli.out, &shot.png_data)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    println!(
        "wrote {} ({}x{}, theme {})",
        cli.out.display(),
        shot.width,
        shot.height,
        card.theme.name
    );
    Ok(())
}
