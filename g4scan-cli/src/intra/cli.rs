use clap::{Command, arg, value_parser};

use crate::common::general_args;

pub const INTRA_CMD: &str = "intra";

pub fn create_intra_cli() -> Command {
    Command::new(INTRA_CMD)
        .about("Predict complete, intramolecular PG4s which can form from one DNA/RNA strand")
        .arg_required_else_help(true)
        .args(general_args())
        .arg(
            arg!(-z --"bulge-pen-factor" [factor] "Factor multiplied by bulge count in scoring")
                .default_value("5")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!(-B --bulges [n] "How many bulged tetrads to allow, up to one bulge per tetrad")
                .default_value("0")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"min-bulge" [len] "Min bulge length allowed in predicted PG4s")
                .default_value("1")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"max-bulge" [len] "Max bulge length allowed in predicted PG4s")
                .default_value("5")
                .value_parser(value_parser!(u32)),
        )
}
