use clap::Parser;
use eyre::{Result, WrapErr};
use fifo_pnl_lib::{run, write_csv, DEFAULT_PRECISION};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Read a transaction record and output FIFO assigned PnL
#[derive(Parser, Debug)]
#[command(name = "fifo-pnl")]
struct Args {
    /// CSV file with columns DATE, QTY, DOLLAR_AMOUNT; QTY > 0 is a buy, QTY < 0 a sell
    input: PathBuf,

    /// Output CSV file with the FIFO assigned open and closed positions
    output: PathBuf,

    /// Number of decimal places quantities are tracked to
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRECISION,
        env = "FIFO_PNL_PRECISION",
        allow_negative_numbers = true
    )]
    precision: i64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = File::open(&args.input)
        .wrap_err_with(|| format!("Failed to open input file {:?}", args.input))?;
    let ledger = run(BufReader::new(file), args.precision)
        .wrap_err_with(|| format!("Failed to match transactions in {:?}", args.input))?;

    // only create the output once matching succeeded, a failed run leaves no rows behind
    let file = File::create(&args.output)
        .wrap_err_with(|| format!("Failed to create output file {:?}", args.output))?;
    write_csv(&ledger, BufWriter::new(file))
        .wrap_err_with(|| format!("Failed to write output file {:?}", args.output))?;

    info!(
        closed = ledger.closed().len(),
        open = ledger.open().len(),
        output = ?args.output,
        "wrote ledger"
    );

    Ok(())
}
