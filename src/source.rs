//! Calling convention shared by record-producing data sources

use crate::error::Result;
use crate::types::Record;

/// A source a scheduler pulls records from
///
/// `fetch_data` returns the complete result of one load; `clear_data` is
/// handed back whatever a previous fetch returned once the caller is done
/// with it; `close` releases the source.
pub trait DataSource {
    fn fetch_data(&mut self) -> Result<Vec<Record>>;

    /// Acknowledge previously fetched data. Sources with nothing to clean up
    /// keep the default no-op.
    fn clear_data(&mut self, _data: &[Record]) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()>;
}
