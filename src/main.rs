// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use app_config::AppConfig;
use clap::{Parser, ValueEnum};
use graph::fan::fan_segments;
use graph::timeline::life_events;
use keyboard::KeyEvent;
use kindred::prelude::*;
use kindred::{StaticToken, LOG_CRATES};
use layout::Direction;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Tb,
    Lr,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Tb => Direction::TopToBottom,
            DirectionArg::Lr => Direction::LeftToRight,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Output {
    /// The positioned nodes and edges on screen.
    #[default]
    Graph,
    /// Pedigree of the selected person.
    Ancestors,
    /// Descendants of the selected person.
    Descendants,
    /// Fan chart segments of the selected person's pedigree.
    Fan,
    /// Births and deaths of everyone shown.
    Timeline,
}

/// Loads a family tree, lays it out, and prints the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "kindred", version)]
struct Cli {
    /// Tree to open.
    tree_id: String,

    /// Settings file instead of the platform default.
    #[arg(long, env = "KINDRED_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Person to select after loading.
    #[arg(long)]
    select: Option<String>,

    /// Show only the lineage of the selected person.
    #[arg(long, requires = "select")]
    focus: bool,

    /// Keys to replay after loading, e.g. `--key up --key ctrl+z`.
    #[arg(long = "key")]
    keys: Vec<String>,

    #[arg(long, value_enum, default_value_t)]
    output: Output,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from_path(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Ok(AppConfig::load()),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let mut settings = ViewSettings::from_config(&config);
    if let Some(direction) = cli.direction {
        settings.layout.direction = direction.into();
    }

    let credentials = Arc::new(StaticToken::from(config.access_token.clone()));
    let api = HttpTreeApi::new(config.api_base_url.clone(), credentials);
    let mut controller = TreeController::new(api, cli.tree_id.clone(), settings);
    controller
        .load()
        .await
        .with_context(|| format!("could not open tree {}", cli.tree_id))?;

    if let Some(person_id) = &cli.select {
        controller.select(person_id)?;
    }
    if cli.focus {
        controller.toggle_focus_mode()?;
    }
    for key in &cli.keys {
        let event: KeyEvent = key.parse()?;
        if !controller.handle_key(event).await? {
            log::info!("Key {} had no effect", key);
        }
    }
    for notice in controller.take_notices() {
        eprintln!("{}", notice);
    }

    let Some(view) = controller.view() else {
        bail!("tree {} is not loaded", cli.tree_id);
    };
    let selected = || {
        controller
            .selected()
            .context("this output needs a selected person (--select)")
    };

    let json = match cli.output {
        Output::Graph => serde_json::to_string_pretty(&view.displayed)?,
        Output::Ancestors => {
            let tree = view
                .graph
                .build_ancestor_tree(selected()?, config.tree.ancestor_depth);
            serde_json::to_string_pretty(&tree)?
        }
        Output::Descendants => {
            let tree = view
                .graph
                .build_descendant_tree(selected()?, config.tree.descendant_depth);
            serde_json::to_string_pretty(&tree)?
        }
        Output::Fan => {
            let segments = view
                .graph
                .build_ancestor_tree(selected()?, config.tree.ancestor_depth)
                .map(|root| fan_segments(&root, config.tree.fan_sweep_degrees))
                .unwrap_or_default();
            serde_json::to_string_pretty(&segments)?
        }
        Output::Timeline => {
            let events = life_events(
                view.displayed
                    .nodes
                    .iter()
                    .filter_map(|node| view.graph.person(&node.person_id)),
            );
            serde_json::to_string_pretty(&events)?
        }
    };
    println!("{}", json);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init(LOG_CRATES);
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("because: {}", cause);
        }
        std::process::exit(1);
    }
}

// End of File
