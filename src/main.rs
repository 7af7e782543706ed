use anyhow::Result;
use clap::Parser;
use pdf2md_batch::{cli, util::local_offset};
use tracing::error;

fn main() -> Result<()> {
    // Read before any thread exists; see `util::local_offset`.
    let offset = local_offset();
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args, offset) {
        if tracing::dispatcher::has_been_set() {
            error!("{:#}", err);
        } else {
            eprintln!("error: {:#}", err);
        }
        std::process::exit(1);
    }
    Ok(())
}
