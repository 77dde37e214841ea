//! Sequencing of a full migration run.

use futures::future::join_all;

use super::{migrators, AdminDisposition, EntityOutcome, MigrationReport, ReportEntry};
use crate::errors::AppError;
use crate::models::Document;
use crate::source::{RelationalSource, SourceResolver};
use crate::store::DocumentStore;

/// Options for a migration run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Build and report the document without writing it
    pub dry_run: bool,
}

/// Runs all entity migrators against one destination store.
pub struct MigrationOrchestrator<'a> {
    store: &'a DocumentStore,
    options: MigrateOptions,
}

impl<'a> MigrationOrchestrator<'a> {
    pub fn new(store: &'a DocumentStore, options: MigrateOptions) -> Self {
        Self { store, options }
    }

    /// Resolve the legacy database, then migrate from it.
    ///
    /// If resolution fails nothing is read from or written to the store.
    pub async fn run<S: RelationalSource>(
        &self,
        resolver: &SourceResolver<S>,
    ) -> Result<MigrationReport, AppError> {
        let source = resolver.resolve().await?;
        self.run_with_source(&source).await
    }

    /// Migrate every entity from `source` and write the result once.
    pub async fn run_with_source<S: RelationalSource>(
        &self,
        source: &S,
    ) -> Result<MigrationReport, AppError> {
        // A dry run must not create the store, so a missing file reads as empty.
        let destination = if self.options.dry_run {
            self.store.read().await?.unwrap_or_default()
        } else {
            self.store.load().await?
        };
        let Document {
            admins: existing_admins,
            extra,
            key_order,
            ..
        } = destination;
        tracing::info!(
            "Destination {:?} has {} administrator(s)",
            self.store.path(),
            existing_admins.len()
        );

        let migrators = migrators();
        let results = join_all(migrators.iter().map(|m| m.run(source))).await;

        let mut document = Document {
            extra,
            key_order,
            ..Document::default()
        };
        let mut entries = Vec::with_capacity(results.len());
        for result in results {
            let outcome = match result.outcome {
                Ok(records) => {
                    let count = records.len();
                    *document.collection_mut(result.collection) = records;
                    EntityOutcome::Migrated(count)
                }
                Err(e) => EntityOutcome::Failed(e.message()),
            };
            entries.push(ReportEntry {
                collection: result.collection,
                outcome,
            });
        }

        let admins = if existing_admins.is_empty() {
            AdminDisposition::FromSource(document.admins.len())
        } else {
            let kept = existing_admins.len();
            document.admins = existing_admins;
            AdminDisposition::KeptExisting(kept)
        };

        let written_to = if self.options.dry_run {
            tracing::info!("Dry run, leaving {:?} untouched", self.store.path());
            None
        } else {
            self.store.save(&document).await?;
            tracing::info!("Migrated document written to {:?}", self.store.path());
            Some(self.store.path().to_path_buf())
        };

        Ok(MigrationReport {
            entries,
            admins,
            totals: document.totals(),
            written_to,
        })
    }
}
