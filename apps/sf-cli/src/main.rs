use clap::{Args, Parser, Subcommand};
use sf_app::{AppResult, CalculateOptions, calculate_file, calculate_files};
use sf_components::tables::DIAMETER_CLASSES_MM;
use sf_components::{CFactor, FittingKind, ValveKind, ValveSize};
use sf_results::CalculationResponse;
use sf_solver::BalanceConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "SprinklerFlow CLI - NS 12845 sprinkler pipe network calculation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request file without solving it
    Validate {
        /// Path to the request file (JSON or YAML)
        request_path: PathBuf,
    },
    /// Calculate one request and print the response document
    Calculate {
        /// Path to the request file (JSON or YAML)
        request_path: PathBuf,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        solve: SolveArgs,
    },
    /// Calculate several requests in parallel and print a summary
    Batch {
        /// Request files
        #[arg(required = true)]
        request_paths: Vec<PathBuf>,
        #[command(flatten)]
        solve: SolveArgs,
    },
    /// Print the fitting and valve equivalent-length tables
    Tables {
        /// C-factor the lengths are adjusted to
        #[arg(long, default_value_t = 120.0)]
        c_factor: f64,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Branch balance iteration cap
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,
    /// Branch balance tolerance in bar
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
    /// Report values at full precision instead of rounding them
    #[arg(long)]
    raw: bool,
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

impl SolveArgs {
    fn options(&self) -> CalculateOptions {
        CalculateOptions {
            balance: BalanceConfig {
                max_iterations: self.max_iterations,
                pressure_tol_bar: self.tolerance,
            },
            rounded: !self.raw,
        }
    }
}

fn main() -> AppResult<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { request_path } => cmd_validate(&request_path),
        Commands::Calculate {
            request_path,
            output,
            solve,
        } => cmd_calculate(&request_path, output.as_deref(), &solve),
        Commands::Batch {
            request_paths,
            solve,
        } => cmd_batch(&request_paths, &solve),
        Commands::Tables { c_factor } => cmd_tables(c_factor),
    }
}

fn cmd_validate(request_path: &Path) -> AppResult<ExitCode> {
    println!("Validating request: {}", request_path.display());
    let request = sf_project::load_request(request_path)?;
    println!(
        "✓ Request is valid ({} nodes, {} pipe sections given)",
        request.noder.len(),
        request.rettstrekk.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_calculate(
    request_path: &Path,
    output: Option<&Path>,
    solve: &SolveArgs,
) -> AppResult<ExitCode> {
    let response = calculate_file(request_path, &solve.options());
    let document = sf_results::to_json(&response, solve.pretty)?;

    match output {
        Some(path) => {
            std::fs::write(path, document + "\n")?;
            println!("Response written to {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok(exit_code(&response))
}

fn cmd_batch(request_paths: &[PathBuf], solve: &SolveArgs) -> AppResult<ExitCode> {
    let options = solve.options();
    let results = calculate_files(request_paths, &options);

    let mut failed = 0;
    for (path, response) in &results {
        if response.success {
            println!(
                "✓ {}: {:.1} L/min at {:.3} bar",
                path.display(),
                response.total_vannmengde_lpm.unwrap_or_default(),
                response.total_trykk_bar.unwrap_or_default()
            );
        } else {
            failed += 1;
            println!(
                "✗ {}: {} ({})",
                path.display(),
                response.error.as_deref().unwrap_or("unknown error"),
                response
                    .error_type
                    .map(|k| k.as_str())
                    .unwrap_or("unclassified")
            );
        }
    }
    println!("\n{} of {} requests calculated", results.len() - failed, results.len());

    if solve.pretty {
        for (_, response) in &results {
            println!("{}", sf_results::to_json(response, true)?);
        }
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_tables(c_factor: f64) -> AppResult<ExitCode> {
    let c = CFactor::try_from(c_factor)?;
    println!(
        "Equivalent lengths (m) for {c}, adjustment {:.3}\n",
        c.adjustment()
    );

    print!("{:<20}", "Fitting");
    for d in DIAMETER_CLASSES_MM {
        print!("{d:>7.0}");
    }
    println!();
    for kind in FittingKind::ALL {
        print!("{:<20}", kind.label());
        for d in DIAMETER_CLASSES_MM {
            let length = kind.equivalent_length_m(d)? * c.adjustment();
            print!("{length:>7.2}");
        }
        println!();
    }

    print!("\n{:<42}", "Valve");
    for size in ValveSize::ALL {
        print!("{:>7}", format!("DN{size}"));
    }
    println!();
    for kind in ValveKind::ALL {
        print!("{:<42}", kind.wire_name());
        for size in ValveSize::ALL {
            print!("{:>7.2}", kind.equivalent_length_m(size) * c.adjustment());
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

fn exit_code(response: &CalculationResponse) -> ExitCode {
    if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
