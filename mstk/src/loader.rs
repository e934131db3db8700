//! Sources of spreadsheet rows.
//!
//! A loader hands the whole table, header included, to the
//! [`Spreadsheet`](crate::spreadsheet::Spreadsheet) parser.

use std::{
    fmt::Display,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::error::Error;

/// Anything that can produce the rows of a translation spreadsheet.
pub trait Loader: Display {
    fn load(&self) -> Result<Vec<Vec<String>>, Error>;
}

/// Loads a CSV or TSV export of the spreadsheet.
///
/// The file is BOM-sniffed, so UTF-16 exports load as well as UTF-8 ones.
/// Without a BOM the content is read as UTF-8 unless another encoding is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLoader {
    path: PathBuf,
    delimiter: u8,
    encoding: Option<&'static Encoding>,
}

impl CsvLoader {
    /// Tab-delimited for `.tsv` files, comma-delimited otherwise.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        Self {
            path,
            delimiter,
            encoding: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Encoding of files without a BOM, e.g. `windows-1252` for legacy
    /// spreadsheet exports.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Same as [`CsvLoader::with_encoding`] with a WHATWG encoding label.
    pub fn with_encoding_label(self, label: &str) -> Result<Self, Error> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::data_source(format!("unknown encoding `{}`", label)))?;
        Ok(self.with_encoding(encoding))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for CsvLoader {
    fn load(&self) -> Result<Vec<Vec<String>>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            Error::data_source(format!(
                "cannot open CSV file with resources {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(self.encoding)
            .bom_override(true)
            .strip_bom(true)
            .build(file);

        let rows = read_rows(decoder, self.delimiter).map_err(|e| {
            Error::data_source(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "loaded spreadsheet");
        Ok(rows)
    }
}

impl Display for CsvLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CSV loader, file {}", self.path.display())
    }
}

/// Rows that are already in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLoader {
    rows: Vec<Vec<String>>,
}

impl MemoryLoader {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

impl Loader for MemoryLoader {
    fn load(&self) -> Result<Vec<Vec<String>>, Error> {
        Ok(self.rows.clone())
    }
}

impl Display for MemoryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory loader, rows: {}", self.rows.len())
    }
}

/// Reads every record of a delimited stream. Rows may differ in length.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
