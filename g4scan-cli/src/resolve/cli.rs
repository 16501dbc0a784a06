use clap::{Command, arg};

pub const RESOLVE_CMD: &str = "resolve";

pub fn create_resolve_cli() -> Command {
    Command::new(RESOLVE_CMD)
        .about("Resolve overlapping PG4 records in an existing bed file sorted by (chrom, start)")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Input bed file of PG4 records, use '-' to read from stdin"))
        .arg(arg!(-o --output <output> "Output bed file, use '-' to write to stdout"))
        .arg(arg!(-m --method [method] "Which resolution method to use (filter or merge)").default_value("filter"))
}
