//! Final serialization of the output package.

use super::PartGraph;
use crate::error::{Error, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serializes a [`PartGraph`] into package bytes.
///
/// Writing is terminal: the graph is consumed, and bytes are only returned
/// once the whole archive has been finished. Every failure is reported as
/// [`Error::PackagingFailure`].
#[derive(Debug, Clone)]
pub struct PackageWriter {
    compression: CompressionMethod,
    prune: bool,
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
            prune: true,
        }
    }
}

impl PackageWriter {
    /// Writer with deflate compression and pruning enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store parts uncompressed.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Keep parts no relationship reaches.
    pub fn without_pruning(mut self) -> Self {
        self.prune = false;
        self
    }

    /// Prune, verify and zip the graph.
    pub fn write(&self, mut graph: PartGraph) -> Result<Vec<u8>> {
        if self.prune {
            let pruned = graph.prune_unreachable();
            if !pruned.is_empty() {
                log::debug!("pruned {} unreachable parts", pruned.len());
            }
        }
        graph.verify()?;
        self.zip(graph).map_err(Error::into_packaging_failure)
    }

    fn zip(&self, graph: PartGraph) -> Result<Vec<u8>> {
        let entries = graph.into_entries()?;
        let options = SimpleFileOptions::default().compression_method(self.compression);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut total = 0usize;
        for (name, data) in &entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
            total += data.len();
        }
        let bytes = zip.finish()?.into_inner();

        log::info!(
            "package written: {} entries, {} bytes uncompressed, {} bytes zipped",
            entries.len(),
            total,
            bytes.len()
        );
        Ok(bytes)
    }
}
