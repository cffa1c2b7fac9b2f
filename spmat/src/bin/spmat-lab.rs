//! Lab driver comparing sparse matrix stores on the tridiagonal fixture

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spmat::export::write_dump;
use spmat::{run_store, BenchConfig, LabError, StorageKind, StoreReport, ToCsr};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spmat-lab")]
#[command(about = "Compare sparse matrix stores on a tridiagonal fixture", long_about = None)]
struct Cli {
    /// Dimension of the tridiagonal fixture
    #[arg(short = 'n', long, default_value_t = 20_000)]
    size: usize,

    /// Store to measure (repeatable, defaults to all)
    #[arg(short, long = "store")]
    stores: Vec<StorageKind>,

    /// Print every filled matrix
    #[arg(short, long)]
    print: bool,

    /// Also time the row-parallel multiply
    #[arg(long)]
    parallel: bool,

    /// Write the CSR export of the first store as JSON
    #[arg(long, value_name = "PATH")]
    csr_json: Option<PathBuf>,
}

fn print_test_result(ok: bool, name: &str) {
    println!("{name} test: {}", if ok { "PASSED" } else { "FAILED" });
}

fn print_report(report: &StoreReport) {
    println!("store: {}", report.kind);
    print_test_result(report.fill_ok, "dimension");
    println!("Elapsed for element access: {:?}", report.insert);
    print_test_result(report.vmult_ok, "vmult");
    println!("Elapsed for vmult: {:?}", report.vmult);
    if let Some(ok) = report.par_vmult_ok {
        print_test_result(ok, "parallel vmult");
    }
    if let Some(elapsed) = report.par_vmult {
        println!("Elapsed for parallel vmult: {elapsed:?}");
    }
    println!("--------------------------");
}

fn run(cli: Cli) -> Result<bool, LabError> {
    let config = BenchConfig::with_size(cli.size)
        .with_kinds(cli.stores)
        .with_parallel(cli.parallel);

    let mut all_passed = true;
    for (k, &kind) in config.kinds.iter().enumerate() {
        let (matrix, report) = run_store(kind, &config)?;
        print_report(&report);
        all_passed &= report.passed();

        if cli.print {
            write_dump(&matrix, &mut io::stdout().lock())?;
            println!("--------------------------");
        }
        if k == 0 {
            if let Some(path) = &cli.csr_json {
                let csr = matrix.to_csr()?;
                spmat::export::write_csr_json(&csr, BufWriter::new(File::create(path)?))?;
                tracing::info!(path = %path.display(), "CSR export written");
            }
        }
    }
    Ok(all_passed)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("spmat-lab: one or more checks failed");
            ExitCode::FAILURE
        }
        Err(err) if err.is_recoverable() => {
            eprintln!("spmat-lab: {err} (rejected input)");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("spmat-lab: {err}");
            ExitCode::FAILURE
        }
    }
}
