//! Report export contract.
//!
//! The summary screen renders a [`SessionReport`] and hands it to a
//! [`ReportExporter`], which produces a downloadable document.

mod view;

pub use view::{EvaluationRow, ReportOption, SessionReport};

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// A document produced by an exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Renders a finished session to a document.
#[async_trait]
pub trait ReportExporter: Send + Sync {
    async fn export(&self, report: &SessionReport) -> Result<ExportedReport>;
}
