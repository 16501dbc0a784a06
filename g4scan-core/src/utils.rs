use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };
    Ok(BufReader::new(file))
}

///
/// Get a reader for a file path, or for stdin when the source is `-`.
///
pub fn get_dynamic_reader_or_stdin(source: &str) -> Result<BufReader<Box<dyn Read>>> {
    if source == "-" {
        Ok(BufReader::new(Box::new(io::stdin())))
    } else {
        get_dynamic_reader(Path::new(source))
    }
}

///
/// Get a writer for a file path (gzip'd if it ends in `.gz`), or for
/// stdout when the destination is `-`.
///
pub fn get_dynamic_writer(dest: &str) -> Result<BufWriter<Box<dyn Write>>> {
    if dest == "-" {
        return Ok(BufWriter::new(Box::new(io::stdout())));
    }
    let path = Path::new(dest);
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let file: Box<dyn Write> = match path.extension() == Some(OsStr::new("gz")) {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::io::BufRead;
    use tempfile::tempdir;

    #[test]
    fn test_plain_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bed");
        let dest = path.to_str().unwrap();

        {
            let mut writer = get_dynamic_writer(dest).unwrap();
            writeln!(writer, "chr1\t0\t10\tpg4\t1\t+").unwrap();
        }

        let lines: Vec<String> = get_dynamic_reader(&path)
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["chr1\t0\t10\tpg4\t1\t+".to_string()]);
    }

    #[test]
    fn test_gz_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.bed.gz");
        let dest = path.to_str().unwrap();

        {
            let mut writer = get_dynamic_writer(dest).unwrap();
            writeln!(writer, "chr1\t0\t10\tpg4\t1\t+").unwrap();
        }

        let lines: Vec<String> = get_dynamic_reader(&path)
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["chr1\t0\t10\tpg4\t1\t+".to_string()]);
    }
}
