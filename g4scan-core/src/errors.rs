use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Record line has too few fields: {0}")]
    TooFewFields(String),

    #[error("Error parsing {field} in record: {value}")]
    FieldParseError { field: &'static str, value: String },

    #[error("Invalid strand: {0}")]
    InvalidStrand(String),

    #[error("Record has start >= end: {0}")]
    EmptyInterval(String),
}
