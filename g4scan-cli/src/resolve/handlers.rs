use std::io::{BufRead, ErrorKind, Write};

use anyhow::Result;
use clap::ArgMatches;
use log::info;

use g4scan_core::models::G4Record;
use g4scan_core::utils::{get_dynamic_reader_or_stdin, get_dynamic_writer};
use g4scan_overlap::ResolveMethod;

use crate::common::resolve_sorted_records;

pub fn run_resolve(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("An input bed file is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("An output bed file is required.");
    let method_str = matches
        .get_one::<String>("method")
        .expect("method has a default");

    let method = match method_str.as_str() {
        "filter" => ResolveMethod::Filter,
        "merge" => ResolveMethod::Merge,
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid resolution method: {}. Valid options are 'filter' or 'merge'",
                method_str
            ));
        }
    };

    let reader = get_dynamic_reader_or_stdin(input)?;
    let mut records: Vec<G4Record> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(G4Record::try_from(line.as_str())?);
    }
    info!("read {} records", records.len());

    let resolved = resolve_sorted_records(records, method);
    info!("{} records left after overlap resolution", resolved.len());

    let mut writer = get_dynamic_writer(output)?;
    for record in &resolved {
        // records keep the field count they arrived with; merged records
        // are always 6-field
        match writeln!(writer, "{}", record) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(()),
            other => other?,
        }
    }
    writer.flush()?;

    Ok(())
}
