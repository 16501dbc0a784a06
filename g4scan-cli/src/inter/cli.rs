use clap::{Command, arg, value_parser};

use crate::common::general_args;

pub const INTER_CMD: &str = "inter";

pub fn create_inter_cli() -> Command {
    Command::new(INTER_CMD)
        .about("Predict partial, intermolecular PG4s which could pair with a partial PG4 from a different DNA/RNA molecule")
        .arg_required_else_help(true)
        .args(general_args())
        .arg(
            arg!(--"min-g-runs" [n] "Min runs of G to use to predict partial PG4s")
                .default_value("2")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"max-g-runs" [n] "Max runs of G to use to predict partial PG4s")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
}
