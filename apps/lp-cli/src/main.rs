use clap::{Parser, Subcommand};
use lp_app::{
    AppError, AppResult, Classification, SimulationOptions, SimulationRequest, list_elements,
    load_equipment, load_network, run_simulation,
};
use lp_core::ElementId;
use lp_results::{RunStore, SimulationResponse};
use lp_topology::MemoryStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lp-cli")]
#[command(about = "Lightpath CLI - optical line system simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network file
    Validate {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// List the elements of a network
    Elements {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Propagate a channel comb along a path
    Simulate {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Comma-separated element ids, starting at a transceiver
        #[arg(long, value_delimiter = ',', required = true)]
        path: Vec<String>,
        /// Per-channel launch power in dBm
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        power: f64,
        /// Equipment library file (built-in library if omitted)
        #[arg(long)]
        equipment: Option<PathBuf>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cached runs for a network
    Runs {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Show a cached run
    ShowRun {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Elements { network_path } => cmd_elements(&network_path),
        Commands::Simulate {
            network_path,
            path,
            power,
            equipment,
            no_cache,
            json,
        } => cmd_simulate(
            &network_path,
            path,
            power,
            equipment.as_deref(),
            !no_cache,
            json,
        ),
        Commands::Runs { network_path } => cmd_runs(&network_path),
        Commands::ShowRun {
            network_path,
            run_id,
            json,
        } => cmd_show_run(&network_path, &run_id, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (message, class) = err.report();
            eprintln!("error ({class}): {message}");
            ExitCode::from(match class {
                Classification::BadRequest => 2,
                Classification::NotFound => 3,
                Classification::Internal => 1,
            })
        }
    }
}

fn cmd_validate(network_path: &Path) -> AppResult<()> {
    println!("Validating network: {}", network_path.display());
    let network = load_network(network_path)?;
    println!(
        "✓ Network '{}' is valid ({} elements, {} connections, {} services)",
        network.network_name,
        network.elements.len(),
        network.connections.len(),
        network.services.len()
    );
    Ok(())
}

fn cmd_elements(network_path: &Path) -> AppResult<()> {
    let network = load_network(network_path)?;
    let elements = list_elements(&network);

    if elements.is_empty() {
        println!("No elements found in network");
    } else {
        println!("Elements in '{}':", network.network_name);
        for el in elements {
            println!(
                "  {:<20} {:<12} {:<20} {}",
                el.id,
                el.kind,
                el.type_variety.as_deref().unwrap_or("-"),
                el.name
            );
        }
    }
    Ok(())
}

fn cmd_simulate(
    network_path: &Path,
    path: Vec<String>,
    power: f64,
    equipment_path: Option<&Path>,
    use_cache: bool,
    json: bool,
) -> AppResult<()> {
    let network = load_network(network_path)?;
    let equipment = load_equipment(equipment_path)?;
    let request = SimulationRequest {
        network_id: network.network_id.clone(),
        path: path.into_iter().map(ElementId::new).collect(),
        input_power_dbm: power,
    };
    let store = MemoryStore::new().with_network(network)?;
    let runs = RunStore::for_network_file(network_path)?;
    let options = SimulationOptions {
        use_cache,
        ..Default::default()
    };

    let run = run_simulation(&store, &equipment, &request, &options, &runs)?;

    if json {
        print_json(&run.response)?;
        return Ok(());
    }

    if run.loaded_from_cache {
        println!("✓ Loaded from cache: {}", run.manifest.run_id);
    } else {
        println!("✓ Simulation completed: {}", run.manifest.run_id);
    }
    print_response(&run.response);
    Ok(())
}

fn cmd_runs(network_path: &Path) -> AppResult<()> {
    let network = load_network(network_path)?;
    let runs = RunStore::for_network_file(network_path)?;
    let manifests = lp_app::list_runs(&runs, &network.network_id)?;

    if manifests.is_empty() {
        println!("No cached runs found for network: {}", network.network_name);
    } else {
        println!("Cached runs for network '{}':", network.network_name);
        for manifest in manifests {
            let path: Vec<&str> = manifest.path.iter().map(ElementId::as_str).collect();
            println!(
                "  {} ({}) {:+.2} dBm via {}",
                manifest.run_id,
                manifest.timestamp,
                manifest.input_power_dbm,
                path.join(" -> ")
            );
        }
    }
    Ok(())
}

fn cmd_show_run(network_path: &Path, run_id: &str, json: bool) -> AppResult<()> {
    let runs = RunStore::for_network_file(network_path)?;
    let (manifest, response) = lp_app::load_run(&runs, run_id)?;

    if json {
        return print_json(&response);
    }

    println!("Run: {}", manifest.run_id);
    println!("  Network: {} ({})", manifest.network_name, manifest.network_id);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Engine: {}", manifest.engine_version);
    println!("  Launch power: {:.2} dBm", manifest.input_power_dbm);
    print_response(&response);
    Ok(())
}

fn print_json(response: &SimulationResponse) -> AppResult<()> {
    let text = serde_json::to_string_pretty(response)
        .map_err(|e| AppError::Results(format!("Failed to serialize response: {}", e)))?;
    println!("{text}");
    Ok(())
}

fn fmt_osnr(osnr: Option<f64>) -> String {
    osnr.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn print_response(response: &SimulationResponse) {
    println!(
        "\n  {:<20} {:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "element", "type", "in dBm", "in OSNR", "out dBm", "out OSNR", "noise mW"
    );
    for step in &response.path_results {
        println!(
            "  {:<20} {:<12} {:>10.2} {:>10} {:>10.2} {:>10} {:>12.3e}",
            step.element_id,
            step.element_type,
            step.input_power_dbm,
            fmt_osnr(step.input_osnr_db),
            step.output_power_dbm,
            fmt_osnr(step.output_osnr_db),
            step.added_noise_mw
        );
    }

    println!("\nFinal:");
    println!("  Power: {:.2} dBm", response.final_power_dbm);
    println!("  OSNR:  {} dB", fmt_osnr(response.final_osnr_db));

    if !response.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &response.warnings {
            println!("  {}", warning.message);
        }
    }
}
