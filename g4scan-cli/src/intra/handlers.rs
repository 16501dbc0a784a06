use anyhow::Result;
use clap::ArgMatches;
use log::{info, warn};

use g4scan_motif::{
    BulgeSpec, G4Scanner, MotifFamily, MotifParams, ScoreWeights, TetradRange,
};

use crate::common::{build_loop_specs, output_options, run_pipeline};

pub fn run_intra(matches: &ArgMatches) -> Result<()> {
    info!("Running in mode: intra");

    let fasta = matches
        .get_one::<String>("fasta")
        .expect("An input fasta file is required.");
    let bed = matches
        .get_one::<String>("bed")
        .expect("An output bed file is required.");

    let get_u32 = |name: &str| *matches.get_one::<u32>(name).expect("arg has a default");
    let get_f64 = |name: &str| *matches.get_one::<f64>(name).expect("arg has a default");

    let params = MotifParams {
        tetrads: TetradRange {
            min: get_u32("min-tetrad"),
            max: get_u32("max-tetrad"),
        },
        loops: build_loop_specs(matches, 3)?,
        family: MotifFamily::Complete {
            bulges: BulgeSpec {
                max_bulges: get_u32("bulges"),
                min: get_u32("min-bulge"),
                max: get_u32("max-bulge"),
            },
        },
        weights: ScoreWeights {
            tetrad_factor: get_f64("tetrad-score-factor"),
            loop_penalty: get_f64("loop-pen-factor"),
            bulge_penalty: get_f64("bulge-pen-factor"),
        },
        case_sensitive: matches.get_flag("soft-mask"),
    };
    info!("Parameters: {:?}", params);
    if get_u32("bulges") > 0 {
        warn!(
            "allowing bulged tetrads multiplies the number of patterns searched and greatly increases run time"
        );
    }

    let scanner = G4Scanner::new(params)?;
    run_pipeline(&scanner, fasta, bed, &output_options(matches))
}
