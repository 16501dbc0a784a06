mod common;
mod inter;
mod intra;
mod resolve;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "g4scan";
    pub const BIN_NAME: &str = "g4scan";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Predict putative G-quadruplexes (PG4s) in nucleic acid sequences and resolve overlapping predictions.")
        .subcommand_required(true)
        .subcommand(intra::cli::create_intra_cli())
        .subcommand(inter::cli::create_inter_cli())
        .subcommand(resolve::cli::create_resolve_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // COMPLETE / INTRAMOLECULAR PG4S
        //
        Some((intra::cli::INTRA_CMD, matches)) => {
            intra::handlers::run_intra(matches)?;
        }

        //
        // PARTIAL / INTERMOLECULAR PG4S
        //
        Some((inter::cli::INTER_CMD, matches)) => {
            inter::handlers::run_inter(matches)?;
        }

        //
        // OVERLAP RESOLUTION OF EXISTING RECORDS
        //
        Some((resolve::cli::RESOLVE_CMD, matches)) => {
            resolve::handlers::run_resolve(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
