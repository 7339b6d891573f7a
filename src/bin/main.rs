use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use tsqr::algorithm::SolveLeastSquares;
use tsqr::config::{DEFAULT_PARTITIONS, DEFAULT_RELATIVE_TOLERANCE, Layout, SolverConfig};
use tsqr::data::problem::LeastSquares;
use tsqr::error::Result;
use tsqr::io::load;

/// Least-squares solver for tall and skinny systems, using a TSQR reduction tree.
#[derive(Parser)]
#[command(version, author = "Li Yihai")]
struct Opts {
    /// File with the matrix in row-major order, followed by the right-hand side unless `--rhs` is
    /// given. Values are separated by whitespace.
    data_file: PathBuf,
    /// File with the right-hand side values.
    #[arg(long)]
    rhs: Option<PathBuf>,
    /// Number of rows of the matrix.
    #[arg(short, long, env = "TSQR_ROWS")]
    rows: usize,
    /// Number of columns of the matrix.
    #[arg(short, long, env = "TSQR_COLUMNS")]
    columns: usize,
    /// Number of partitions to factor independently.
    #[arg(short, long, env = "TSQR_PARTITIONS", conflicts_with = "block_rows")]
    partitions: Option<usize>,
    /// Number of rows per partition, instead of a partition count.
    #[arg(long, env = "TSQR_BLOCK_ROWS")]
    block_rows: Option<usize>,
    /// Diagonal values of the final factor below this fraction of the largest one count as zero.
    #[arg(long, env = "TSQR_TOLERANCE", default_value_t = DEFAULT_RELATIVE_TOLERANCE)]
    tolerance: f64,
    /// Factor and combine on a single thread.
    #[arg(long)]
    serial: bool,
    /// Log level.
    #[arg(long, value_enum, env = "TSQR_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Opts {
    fn config(&self) -> SolverConfig {
        let layout = match (self.partitions, self.block_rows) {
            (_, Some(block_rows)) => Layout::BlockRows(block_rows),
            (Some(partitions), None) => Layout::Partitions(partitions),
            (None, None) => Layout::Partitions(DEFAULT_PARTITIONS),
        };

        SolverConfig::default()
            .with_layout(layout)
            .with_relative_tolerance(self.tolerance)
            .with_parallel(!self.serial)
    }

    fn problem(&self) -> Result<LeastSquares<f64>> {
        info!("Reading data file: \"{}\"", self.data_file.to_string_lossy());
        let values = load(&self.data_file)?;

        match &self.rhs {
            None => LeastSquares::from_flat(values, self.rows, self.columns),
            Some(rhs_file) => {
                info!("Reading right-hand side file: \"{}\"", rhs_file.to_string_lossy());
                let rhs = load(rhs_file)?.into_data();

                let mut matrix = values;
                matrix.reshape(self.rows, self.columns)?;
                LeastSquares::new(matrix, rhs)
            },
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    let problem = opts.problem()?;
    let solution = problem.solve(&opts.config())?;

    println!("Solution:");
    for value in &solution.x {
        println!("{}", value);
    }
    println!("Residual norm: {}", solution.residual_norm);

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level.into())
        .init();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        },
    }
}
