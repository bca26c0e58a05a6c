//! CSV file data source: load, decode, parse

use crate::config::SourceConfig;
use crate::csv::CsvParser;
use crate::error::{CsvError, Result};
use crate::source::DataSource;
use crate::types::Record;
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;

/// CSV file exposed as a [`DataSource`]
///
/// The file and the encoding label are checked when the source is created, so
/// a missing file or an unknown encoding fails before any parsing happens.
/// Every [`fetch_data`](DataSource::fetch_data) reads the whole file again and
/// parses it from scratch.
///
/// # Examples
///
/// ```no_run
/// use csvsource::{CsvDataSource, DataSource};
///
/// let mut source = CsvDataSource::open("data.csv")
///     .unwrap()
///     .has_header(true);
///
/// for record in source.fetch_data().unwrap() {
///     println!("{:?}", record);
/// }
/// source.close().unwrap();
/// ```
///
/// # From scheduler parameters
///
/// ```no_run
/// use csvsource::{CsvDataSource, DataSource};
/// use std::collections::HashMap;
///
/// let mut params = HashMap::new();
/// params.insert("filePath".to_string(), "data.csv".to_string());
/// params.insert("codePage".to_string(), "windows-1251".to_string());
///
/// let mut source = CsvDataSource::from_parameters(&params).unwrap();
/// let records = source.fetch_data().unwrap();
/// ```
#[derive(Debug)]
pub struct CsvDataSource {
    config: SourceConfig,
    encoding: &'static Encoding,
    parser: CsvParser,
    closed: bool,
}

impl CsvDataSource {
    /// Open a UTF-8 CSV file without a header row
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(SourceConfig::new(path.as_ref()))
    }

    pub fn from_parameters(params: &HashMap<String, String>) -> Result<Self> {
        Self::from_config(SourceConfig::from_parameters(params)?)
    }

    pub fn from_config(config: SourceConfig) -> Result<Self> {
        check_readable(&config.path)?;

        let encoding = Encoding::for_label(config.encoding.trim().as_bytes())
            .ok_or_else(|| CsvError::EncodingInvalid(config.encoding.clone()))?;

        log::debug!(
            "opened CSV source {} ({}, header: {})",
            config.path.display(),
            encoding.name(),
            config.parser.has_header
        );

        Ok(CsvDataSource {
            parser: CsvParser::with_options(config.parser),
            config,
            encoding,
            closed: false,
        })
    }

    /// Indicate that the first row contains headers (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.config.parser.has_header = has;
        self.parser = self.parser.has_header(has);
        self
    }

    /// Reject files ending inside a quoted field (builder pattern)
    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.config.parser.strict_quotes = strict;
        self.parser = self.parser.strict_quotes(strict);
        self
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Resolved encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read and decode the whole file
    ///
    /// A byte order mark is stripped. Malformed byte sequences become U+FFFD.
    pub fn read_text(&self) -> Result<String> {
        let path = &self.config.path;
        let bytes = fs::read(path).map_err(|e| CsvError::io(path, e))?;

        let (text, had_errors) = self.encoding.decode_with_bom_removal(&bytes);
        if had_errors {
            log::warn!(
                "{} contains byte sequences that are not valid {}; replaced with U+FFFD",
                path.display(),
                self.encoding.name()
            );
        }
        Ok(text.into_owned())
    }
}

impl DataSource for CsvDataSource {
    fn fetch_data(&mut self) -> Result<Vec<Record>> {
        if self.closed {
            return Err(CsvError::Closed);
        }

        let text = self.read_text()?;
        if text.is_empty() {
            log::debug!("{} is empty", self.config.path.display());
            return Ok(Vec::new());
        }

        let records = self.parser.parse(&text)?;
        log::debug!(
            "parsed {} records from {}",
            records.len(),
            self.config.path.display()
        );
        Ok(records)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            log::debug!("closed CSV source {}", self.config.path.display());
            self.closed = true;
        }
        Ok(())
    }
}

fn check_readable(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| CsvError::io(path, e))?;
    if !meta.is_file() {
        return Err(CsvError::unavailable(path, "not a regular file"));
    }
    File::open(path).map_err(|e| CsvError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_read_plain_csv() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "plain.csv", b"Alice,30\nBob,25\n");

        let mut source = CsvDataSource::open(&path)?;
        let records = source.fetch_data()?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["0"], "Alice");
        assert_eq!(records[1]["1"], "25");
        Ok(())
    }

    #[test]
    fn test_read_with_headers() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "headers.csv", b"ID,Name\r\n1,Alice\r\n2,Bob");

        let mut source = CsvDataSource::open(&path)?.has_header(true);
        let records = source.fetch_data()?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["ID"], "1");
        assert_eq!(records[1]["Name"], "Bob");
        assert!(source.config().parser.has_header);
        Ok(())
    }

    #[test]
    fn test_single_byte_encoding() -> Result<()> {
        let dir = TempDir::new().unwrap();
        // "имя,1" in windows-1251
        let path = write_file(&dir, "cp1251.csv", &[0xE8, 0xEC, 0xFF, b',', b'1', b'\n']);

        let config = SourceConfig::new(&path).encoding("windows-1251");
        let mut source = CsvDataSource::from_config(config)?;
        let records = source.fetch_data()?;

        assert_eq!(source.encoding(), encoding_rs::WINDOWS_1251);
        assert_eq!(records[0]["0"], "имя");
        Ok(())
    }

    #[test]
    fn test_bom_is_stripped() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bom.csv", b"\xEF\xBB\xBFname\nx\n");

        let mut source = CsvDataSource::open(&path)?.has_header(true);
        let records = source.fetch_data()?;

        assert_eq!(records[0].keys().next().map(String::as_str), Some("name"));
        Ok(())
    }

    #[test]
    fn test_malformed_bytes_are_replaced() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", b"a\xFFb\n");

        let mut source = CsvDataSource::open(&path)?;
        assert_eq!(source.fetch_data()?[0]["0"], "a\u{FFFD}b");
        Ok(())
    }

    #[test]
    fn test_empty_file_yields_no_records() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", b"");

        let mut source = CsvDataSource::open(&path)?;
        assert!(source.fetch_data()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CsvDataSource::open(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, CsvError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = CsvDataSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, CsvError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_unknown_encoding() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", b"a\n");
        let err = CsvDataSource::from_config(SourceConfig::new(&path).encoding("klingon"))
            .unwrap_err();
        assert!(matches!(err, CsvError::EncodingInvalid(ref name) if name == "klingon"));
    }

    #[test]
    fn test_parse_error_propagates() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.csv", b"ok\nab\"c\n");

        let mut source = CsvDataSource::open(&path).unwrap();
        let err = source.fetch_data().unwrap_err();
        assert!(err.is_parse_error());
        assert!(matches!(err, CsvError::MalformedQuoting { offset: 5, .. }));
    }

    #[test]
    fn test_fetch_is_repeatable() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "twice.csv", b"a\nb\n");

        let mut source = CsvDataSource::open(&path)?;
        let first = source.fetch_data()?;
        source.clear_data(&first)?;
        let second = source.fetch_data()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_fetch_after_close() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "closed.csv", b"a\n");

        let mut source = CsvDataSource::open(&path)?;
        source.close()?;
        source.close()?;
        assert!(source.is_closed());
        assert!(matches!(source.fetch_data(), Err(CsvError::Closed)));
        Ok(())
    }

    #[test]
    fn test_from_parameters() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "params.csv", b"k,v\n1,2\n");

        let mut params = HashMap::new();
        params.insert("filePath".to_string(), path.to_string_lossy().to_string());
        params.insert("expectHeader".to_string(), "true".to_string());

        let mut source = CsvDataSource::from_parameters(&params)?;
        let records = source.fetch_data()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["v"], "2");
        Ok(())
    }
}
