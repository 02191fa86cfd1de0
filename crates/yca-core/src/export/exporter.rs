//! Exporter trait and manager

use crate::error::{Result, YcaError};
use crate::report::AnalysisReport;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for report exporters
pub trait Exporter: Send + Sync {
    /// Export a report to string
    fn export(&self, report: &AnalysisReport) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::json::JsonExporter::new()));
        manager.register(Box::new(super::markdown::MarkdownExporter::new()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export a report to the specified format
    pub fn export(&self, report: &AnalysisReport, format: &str) -> Result<String> {
        self.exporter(format)?.export(report)
    }

    /// Export a report and write it to a file, returning the path written
    ///
    /// A path without an extension gets the exporter's extension.
    pub fn export_to_file(
        &self,
        report: &AnalysisReport,
        format: &str,
        path: &Path,
    ) -> Result<PathBuf> {
        let exporter = self.exporter(format)?;
        let content = exporter.export(report)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        // Write to a sibling temp file, then rename over the target
        let temp_path = final_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        fs::rename(&temp_path, &final_path)?;
        tracing::debug!("Exported report {} to {:?}", report.id, final_path);
        Ok(final_path)
    }

    fn exporter(&self, format: &str) -> Result<&dyn Exporter> {
        self.exporters
            .get(format)
            .map(|e| e.as_ref())
            .ok_or_else(|| YcaError::Config(format!("Unknown export format: {}", format)))
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}
