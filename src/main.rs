// Trains the configured networks side by side on a piecewise target path,
// then saves their parameters and exports their closed-form formulas.
//
// Run with:
//   cargo run --release                 # built-in comparison set
//   cargo run --release -- run.json     # RunConfig JSON; omitted fields default
//
// While training, type a command and press enter:
//   s  save parameters now
//   f  export formulas now
//   q  stop after the current pass, then save and export as configured
//
// Verbosity follows RUST_LOG (default `info`).
use std::error::Error;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use pathfit_nn::{
    formula, train::evaluate, train_loop_with, Checkpoint, FileStore, Registry, RunConfig,
    TrainConfig,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Save,
    Export,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "s" | "save" => Some(Command::Save),
        "f" | "formula" => Some(Command::Export),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Reads commands from stdin on a background thread. End of input leaves
/// training running.
fn spawn_command_reader(stop: Arc<AtomicBool>, checkpoint: &Checkpoint) {
    let save = checkpoint.save_requested.clone();
    let export = checkpoint.export_requested.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(Command::Save) => save.store(true, Ordering::Relaxed),
                Some(Command::Export) => export.store(true, Ordering::Relaxed),
                Some(Command::Quit) => {
                    info!("stopping after the current pass");
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
                None if line.trim().is_empty() => {}
                None => warn!("unknown command {:?}; use s, f or q", line.trim()),
            }
        }
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("reading config from {path}");
            RunConfig::load_json(&path)?
        }
        None => RunConfig::default(),
    };
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let set = config.training_set();
    let mut registry = Registry::from_specs(&config.networks, &mut rng)?;
    info!("{} networks, {} training samples", registry.len(), set.len());

    let mut store = FileStore::new(&config.store_dir);
    if config.load_on_start {
        // Mismatched or missing slots are logged by load_all; training just
        // starts from the fresh parameters for those networks.
        registry.load_all(&store);
    }

    let mut checkpoint = Checkpoint::new(config.save_every);
    if config.export_formulas {
        checkpoint = checkpoint.with_exports(&config.export_dir);
    }
    let stop = Arc::new(AtomicBool::new(false));
    spawn_command_reader(stop.clone(), &checkpoint);

    let mut train_config = TrainConfig::new(config.passes, config.render_every);
    train_config.stop_flag = Some(stop);

    let passes = train_loop_with(&mut registry, &set, &train_config, |pass, registry| {
        if let Err(e) = checkpoint.after_pass(pass, registry, &mut store) {
            warn!("pass {pass}: checkpoint failed: {e}");
        }
    });
    info!("finished {passes} passes");

    if config.save_on_finish {
        registry.save_all(&mut store)?;
    }

    for (id, network) in registry.iter_mut() {
        let mse = evaluate(network, &set);
        println!("{id:>3}  {:<12} mse = {mse:.6}", network.architecture());
    }

    if config.export_formulas {
        formula::export_all(&registry, &config.export_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_commands() {
        assert_eq!(parse_command("s"), Some(Command::Save));
        assert_eq!(parse_command("  formula\n"), Some(Command::Export));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command(""), None);
    }
}
