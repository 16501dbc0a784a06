use anyhow::Result;
use clap::ArgMatches;
use log::info;

use g4scan_motif::{G4Scanner, MotifFamily, MotifParams, RunRange, ScoreWeights, TetradRange};

use crate::common::{build_loop_specs, output_options, run_pipeline};

pub fn run_inter(matches: &ArgMatches) -> Result<()> {
    info!("Running in mode: inter");

    let fasta = matches
        .get_one::<String>("fasta")
        .expect("An input fasta file is required.");
    let bed = matches
        .get_one::<String>("bed")
        .expect("An output bed file is required.");

    let get_u32 = |name: &str| *matches.get_one::<u32>(name).expect("arg has a default");
    let get_f64 = |name: &str| *matches.get_one::<f64>(name).expect("arg has a default");

    let runs = RunRange {
        min: get_u32("min-g-runs"),
        max: get_u32("max-g-runs"),
    };
    let params = MotifParams {
        tetrads: TetradRange {
            min: get_u32("min-tetrad"),
            max: get_u32("max-tetrad"),
        },
        loops: build_loop_specs(matches, runs.max.saturating_sub(1) as usize)?,
        family: MotifFamily::Partial { runs },
        weights: ScoreWeights {
            tetrad_factor: get_f64("tetrad-score-factor"),
            loop_penalty: get_f64("loop-pen-factor"),
            // partial motifs carry no bulges
            bulge_penalty: 0.0,
        },
        case_sensitive: matches.get_flag("soft-mask"),
    };
    info!("Parameters: {:?}", params);

    let scanner = G4Scanner::new(params)?;
    run_pipeline(&scanner, fasta, bed, &output_options(matches))
}
