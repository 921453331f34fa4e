use clap::{Parser, Subcommand};
use mazeroute_common::io::{parser, writer};
use mazeroute_common::util::config::RouterConfig;
use mazeroute_common::util::{generator, logger, verify};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an input file, route every net, and write the result.
    Route {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        #[arg(long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Write a random synthetic input file for exercising the router.
    Generate {
        #[arg(long, default_value_t = 50)]
        width: u32,

        #[arg(long, default_value_t = 50)]
        height: u32,

        #[arg(long, default_value_t = 20)]
        obstacles: usize,

        #[arg(long, default_value_t = 10)]
        nets: usize,

        #[arg(long = "pins-per-net", default_value_t = 2)]
        pins_per_net: usize,

        #[arg(long, default_value = "input.txt")]
        output: String,
    },
}

fn load_config(path: &PathBuf) -> RouterConfig {
    if path.exists() {
        log::info!("loading configuration from {:?}", path);
        match std::fs::read_to_string(path).and_then(|s| {
            toml::from_str(&s).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        }) {
            Ok(cfg) => return cfg,
            Err(e) => log::warn!("failed to parse {:?} ({}), using defaults", path, e),
        }
    } else {
        log::warn!("configuration file {:?} not found, using defaults", path);
    }
    RouterConfig::default()
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Route {
            input,
            output,
            config,
        } => {
            let cfg = load_config(&config);

            let db = match parser::parse_with_max_size(&input, cfg.max_grid_size) {
                Ok(db) => db,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            };

            let routed = mazeroute_router::route(&db, &cfg);
            log::info!("routed {}/{} nets", routed.len(), db.nets.len());

            if let Err(report) = verify::check_route_invariants(&db, &routed) {
                log::error!("route invariant violations: {}", report);
                std::process::exit(1);
            }

            writer::write(&output, &db, &routed)?;
            log::info!("wrote {:?}", output);
        }
        Commands::Generate {
            width,
            height,
            obstacles,
            nets,
            pins_per_net,
            output,
        } => {
            generator::generate_random_input(&output, width, height, obstacles, nets, pins_per_net)?;
            log::info!("generated {:?}", output);
        }
    }

    Ok(())
}
