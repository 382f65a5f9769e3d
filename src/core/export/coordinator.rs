//! Export coordinator - glue between the UI layer and the engine
//!
//! The coordinator holds the format registry and configuration, turns config
//! defaults into requests, builds plans from a [`SelectionProvider`] and runs
//! them through a [`BatchExporter`].

use super::batch::{BatchExporter, ExportProgress};
use super::summary::ExportReport;
use crate::adapters::{GeometryExporter, SelectionProvider};
use crate::config::MultiExportConfig;
use crate::core::formats::FormatRegistry;
use crate::core::plan::{ExportPlan, ExportPlanBuilder, ExportRequest};
use crate::domain::Result;

/// Export coordinator
pub struct ExportCoordinator {
    registry: FormatRegistry,
    config: MultiExportConfig,
}

impl ExportCoordinator {
    /// Create a coordinator over the standard format registry
    pub fn new(config: MultiExportConfig) -> Self {
        Self::with_registry(FormatRegistry::standard(), config)
    }

    /// Create a coordinator over a custom registry
    pub fn with_registry(registry: FormatRegistry, config: MultiExportConfig) -> Self {
        Self { registry, config }
    }

    /// The format registry
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// The configuration
    pub fn config(&self) -> &MultiExportConfig {
        &self.config
    }

    /// Build a request pre-filled from the configured defaults
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured mesh values are out of range.
    pub fn request_from_config(&self) -> Result<ExportRequest> {
        let export = &self.config.export;
        let mut request = ExportRequest::new(export.formats.iter().cloned())
            .mesh_quality(self.config.mesh.to_mesh_quality()?);

        if let Some(dir) = &export.output_directory {
            request = request.directory(dir.clone());
        }
        if let Some(name) = &export.base_filename {
            request = request.base_filename(name.clone());
        }

        Ok(request)
    }

    /// Read the provider's selection once and build a plan
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is written.
    pub fn prepare(
        &self,
        provider: &dyn SelectionProvider,
        request: &ExportRequest,
    ) -> Result<ExportPlan> {
        let plan = ExportPlanBuilder::new(&self.registry).build_from_provider(provider, request)?;
        Ok(plan)
    }

    /// Run `plan` and log its summary
    pub fn execute<E, P, C>(
        &self,
        plan: &ExportPlan,
        exporter: E,
        progress: P,
        cancel: C,
    ) -> ExportReport
    where
        E: GeometryExporter,
        P: FnMut(&ExportProgress),
        C: Fn() -> bool,
    {
        let mut batch =
            BatchExporter::new(exporter).with_atomic_writes(self.config.export.atomic_writes);
        let report = batch.run(plan, progress, cancel);
        report.log_summary();
        report
    }

    /// Render the final status message using the configured limits
    pub fn status_message(&self, report: &ExportReport) -> String {
        report.summarize().render_message(
            self.config.report.max_files_shown,
            self.config.report.max_errors_shown,
        )
    }
}
