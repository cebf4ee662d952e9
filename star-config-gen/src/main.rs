use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ros_script_core::{merge_configs, parse_file, shorten, write, write_file};
use star_config_gen::enumerate::enumerate_networks;
use star_config_gen::generate::extra::{default_game_catalog, load_game_catalog, GameCatalog};
use star_config_gen::orchestrate::{topology_cg, RouterOutput, RouterRole};
use star_config_gen::report::{
    render_catalog, render_config_summary, render_networks, render_outputs_summary,
};
use star_config_gen::topology::load_topology;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command, GamesArgs, GenerateArgs, MergeArgs, NetworksArgs, RouterSelect};
use cli::{ScriptFormat, TableFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Networks(args) => run_networks(args),
        Command::Merge(args) => run_merge(args),
        Command::Games(args) => run_games(args),
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<GameCatalog> {
    match path {
        Some(path) => load_game_catalog(path)
            .with_context(|| format!("failed to load game catalog {}", path.display())),
        None => Ok(default_game_catalog()),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let state = load_topology(&args.topology)?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    let outputs: Vec<RouterOutput> = topology_cg(&state, &catalog)
        .with_context(|| format!("failed to generate {}", args.topology.display()))?
        .into_iter()
        .filter(|o| match args.router {
            RouterSelect::All => true,
            RouterSelect::Master => o.role == RouterRole::Master,
            RouterSelect::Slave => o.role == RouterRole::Slave,
        })
        .collect();
    if outputs.is_empty() {
        bail!(
            "no {} router to generate in {} (slaves are only generated in Trunk Mode)",
            match args.router {
                RouterSelect::All => "",
                RouterSelect::Master => "master ",
                RouterSelect::Slave => "slave ",
            },
            args.topology.display()
        );
    }
    tracing::info!(routers = outputs.len(), "generated router configs");

    let rendered = match args.format {
        ScriptFormat::Json => serde_json::to_string_pretty(&outputs)?,
        ScriptFormat::Script => render_scripts(&outputs),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", render_outputs_summary(&outputs));
            println!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn render_scripts(outputs: &[RouterOutput]) -> String {
    let mut out = String::new();
    for (idx, output) in outputs.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let role = match output.role {
            RouterRole::Master => "master",
            RouterRole::Slave => "slave",
        };
        out.push_str(&format!("# {role}: {}\n", output.model));
        out.push_str(&write(&output.config));
    }
    out
}

fn run_networks(args: NetworksArgs) -> Result<()> {
    let state = load_topology(&args.topology)?;
    let networks = enumerate_networks(&state.networks, state.subnets.as_ref())
        .with_context(|| format!("invalid networks in {}", args.topology.display()))?;
    match args.format {
        TableFormat::Text => println!("{}", render_networks(&networks)),
        TableFormat::Json => println!("{}", serde_json::to_string_pretty(&networks)?),
    }
    Ok(())
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let mut configs = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let config =
            parse_file(file).with_context(|| format!("failed to parse {}", file.display()))?;
        configs.push(config);
    }
    let mut merged = merge_configs(configs);
    if args.shorten {
        merged = shorten(merged);
    }
    write_file(&merged, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "merged {} files into {} ({})",
        args.files.len(),
        args.output.display(),
        render_config_summary(&merged)
    );
    Ok(())
}

fn run_games(args: GamesArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    println!("{}", render_catalog(&catalog));
    Ok(())
}
