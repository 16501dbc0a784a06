use std::io::{ErrorKind, Write};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgMatches, arg, value_parser};
use indicatif::ProgressBar;
use log::info;

use g4scan_core::models::G4Record;
use g4scan_core::utils::{get_dynamic_reader_or_stdin, get_dynamic_writer};
use g4scan_motif::{G4Scanner, LoopSpec};
use g4scan_overlap::{ResolveMethod, cluster_overlapping};

/// How the scan pipeline writes its records.
pub struct OutputOptions {
    pub bed12: bool,
    pub resolve: Option<ResolveMethod>,
}

/// Arguments shared by the intra and inter subcommands.
pub fn general_args() -> Vec<Arg> {
    vec![
        arg!(-f --fasta <fasta> "Input fasta file, use '-' to read from stdin"),
        arg!(-b --bed <bed> "Output bed file, use '-' to write to stdout"),
        arg!(-t --bed12 "Write bed12 output (default)").conflicts_with("bed6"),
        arg!(-s --bed6 "Write bed6 output instead of bed12 (some information is lost)"),
        arg!(-F --"filter-overlapping" "Remove overlapping PG4s, keeping the maximum number of high scoring non-overlapping PG4s")
            .conflicts_with("merge-overlapping"),
        arg!(-M --"merge-overlapping" "Flatten overlapping PG4s into single records, forces bed6 output"),
        arg!(-c --"soft-mask" "Switch on case sensitivity so soft masked (lower case) regions are ignored"),
        arg!(-x --"tetrad-score-factor" [factor] "Factor multiplied by tetrad length in scoring")
            .default_value("20")
            .value_parser(value_parser!(f64)),
        arg!(-y --"loop-pen-factor" [factor] "Factor multiplied by total loop length in scoring")
            .default_value("1.5")
            .value_parser(value_parser!(f64)),
        arg!(--"min-tetrad" [n] "Min tetrad length of predicted PG4s")
            .default_value("3")
            .value_parser(value_parser!(u32)),
        arg!(--"max-tetrad" [n] "Max tetrad length of predicted PG4s")
            .default_value("3")
            .value_parser(value_parser!(u32)),
        arg!(--"min-loop" [len] "Min loop length, a single int or comma separated ints for each loop (5'->3')")
            .default_value("1"),
        arg!(--"max-loop" [len] "Max loop length, a single int or comma separated ints for each loop (5'->3')")
            .default_value("7"),
        arg!(-G --"allow-g" [flags] "Allow G in PG4 loops, 0 to disallow G in all loops or comma separated 0s and 1s per loop")
            .default_value("1"),
    ]
}

///
/// Expand a scalar-or-comma-list argument to the expected count: a single
/// value is repeated, a full list is taken as is.
///
pub fn parse_scalar_or_list<T>(raw: &str, expected: usize, what: &str) -> Result<Vec<T>>
where
    T: FromStr + Clone,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let values: Vec<T> = raw
        .split(',')
        .map(|v| v.trim().parse::<T>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("{what} should be a single value or comma separated values"))?;
    if values.len() == 1 {
        Ok(vec![values[0].clone(); expected])
    } else if values.len() == expected {
        Ok(values)
    } else {
        bail!("{what} should be a single value or {expected} comma separated values");
    }
}

/// Assemble the loop specs from the three scalar-or-list loop arguments.
pub fn build_loop_specs(matches: &ArgMatches, expected: usize) -> Result<Vec<LoopSpec>> {
    let get = |name: &str| -> &str {
        matches
            .get_one::<String>(name)
            .expect("loop args have defaults")
    };
    let mins: Vec<u32> = parse_scalar_or_list(get("min-loop"), expected, "--min-loop")?;
    let maxes: Vec<u32> = parse_scalar_or_list(get("max-loop"), expected, "--max-loop")?;
    let allow: Vec<u32> = parse_scalar_or_list(get("allow-g"), expected, "--allow-g")?;

    Ok(mins
        .into_iter()
        .zip(maxes)
        .zip(allow)
        .map(|((min, max), allow_g)| LoopSpec {
            min,
            max,
            allow_g: allow_g != 0,
        })
        .collect())
}

pub fn output_options(matches: &ArgMatches) -> OutputOptions {
    let resolve = if matches.get_flag("filter-overlapping") {
        Some(ResolveMethod::Filter)
    } else if matches.get_flag("merge-overlapping") {
        Some(ResolveMethod::Merge)
    } else {
        None
    };
    // merged records have no block structure left to report
    let bed12 = !matches.get_flag("bed6") && resolve != Some(ResolveMethod::Merge);
    OutputOptions { bed12, resolve }
}

///
/// Scan every fasta sequence, sort the records, optionally resolve
/// overlaps, and write the result.
///
pub fn run_pipeline(
    scanner: &G4Scanner,
    fasta: &str,
    bed: &str,
    opts: &OutputOptions,
) -> Result<()> {
    info!("compiled {} search patterns", scanner.patterns().len());

    let reader = get_dynamic_reader_or_stdin(fasta)?;
    let fasta_reader = bio::io::fasta::Reader::new(reader);

    let spinner = ProgressBar::new_spinner();
    let mut records: Vec<G4Record> = Vec::new();
    for result in fasta_reader.records() {
        let entry =
            result.with_context(|| format!("Failed to read fasta record from {}", fasta))?;
        let seq = std::str::from_utf8(entry.seq())
            .with_context(|| format!("Sequence {} is not valid UTF-8", entry.id()))?;
        let found = scanner.scan(entry.id(), seq);
        spinner.set_message(format!("{}: {} PG4s", entry.id(), found.len()));
        spinner.tick();
        records.extend(found);
    }
    spinner.finish_and_clear();
    info!("predicted {} candidate PG4s", records.len());

    sort_records(&mut records);

    if let Some(method) = opts.resolve {
        records = resolve_sorted_records(records, method);
        info!("{} PG4s left after overlap resolution", records.len());
    }

    write_records(&records, bed, opts.bed12)
}

///
/// Cluster a `(chrom, start)`-sorted record set and resolve each cluster,
/// re-sorting the output.
///
pub fn resolve_sorted_records(records: Vec<G4Record>, method: ResolveMethod) -> Vec<G4Record> {
    let mut resolved: Vec<G4Record> = cluster_overlapping(records)
        .flat_map(|cluster| method.resolve(cluster))
        .collect();
    sort_records(&mut resolved);
    resolved
}

pub fn sort_records(records: &mut [G4Record]) {
    records.sort_by(|a, b| {
        (a.chrom.as_str(), a.start, a.end).cmp(&(b.chrom.as_str(), b.start, b.end))
    });
}

pub fn write_records(records: &[G4Record], dest: &str, bed12: bool) -> Result<()> {
    let mut writer = get_dynamic_writer(dest)?;
    for record in records {
        let line = if bed12 {
            record.as_bed12()
        } else {
            record.as_bed6()
        };
        match writeln!(writer, "{}", line) {
            // writing into a closed pipe (e.g. | head) is not an error
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(()),
            other => other?,
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::io::BufRead;
    use tempfile::tempdir;

    use g4scan_motif::MotifParams;

    #[test]
    fn test_parse_scalar_expands_to_expected_count() {
        let values: Vec<u32> = parse_scalar_or_list("7", 3, "--max-loop").unwrap();
        assert_eq!(values, vec![7, 7, 7]);
    }

    #[test]
    fn test_parse_full_list_is_kept() {
        let values: Vec<u32> = parse_scalar_or_list("12,7,7", 3, "--max-loop").unwrap();
        assert_eq!(values, vec![12, 7, 7]);
    }

    #[test]
    fn test_parse_wrong_length_list_is_rejected() {
        assert!(parse_scalar_or_list::<u32>("1,2", 3, "--min-loop").is_err());
        assert!(parse_scalar_or_list::<u32>("a", 3, "--min-loop").is_err());
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempdir().unwrap();
        let fasta_path = dir.path().join("seqs.fa");
        let bed_path = dir.path().join("out.bed");
        std::fs::write(&fasta_path, ">test\nAAGGGACTGGGATGGGTTTGGGTTT\n").unwrap();

        let scanner = G4Scanner::new(MotifParams::default()).unwrap();
        let opts = OutputOptions {
            bed12: true,
            resolve: None,
        };
        run_pipeline(
            &scanner,
            fasta_path.to_str().unwrap(),
            bed_path.to_str().unwrap(),
            &opts,
        )
        .unwrap();

        let lines: Vec<String> = std::fs::read_to_string(&bed_path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "test\t2\t22\t3t0b3,2,3l\t48\t+\t2\t22\t85,118,209\t4\t3,3,3,3\t0,6,11,17"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_pipeline_with_filter_keeps_best_partial() {
        let dir = tempdir().unwrap();
        let fasta_path = dir.path().join("seqs.fa");
        let bed_path = dir.path().join("out.bed");
        {
            let mut fasta = std::fs::File::create(&fasta_path).unwrap();
            writeln!(fasta, ">test").unwrap();
            writeln!(fasta, "AAGGGACTGGGATGGGTTT").unwrap();
        }

        let scanner = G4Scanner::new(MotifParams::default_partial()).unwrap();
        let opts = OutputOptions {
            bed12: false,
            resolve: Some(ResolveMethod::Filter),
        };
        run_pipeline(
            &scanner,
            fasta_path.to_str().unwrap(),
            bed_path.to_str().unwrap(),
            &opts,
        )
        .unwrap();

        let reader = std::io::BufReader::new(std::fs::File::open(&bed_path).unwrap());
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
        // three overlapping partials collapse to the highest scoring one
        assert_eq!(lines, vec!["test\t8\t16\tPG4_3t_2\t57\t+".to_string()]);
    }
}
