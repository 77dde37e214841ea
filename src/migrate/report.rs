//! Per-run migration report.

use std::fmt;
use std::path::PathBuf;

use crate::models::Collection;

/// What happened to one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityOutcome {
    Migrated(usize),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub collection: Collection,
    pub outcome: EntityOutcome,
}

/// Where the written `admins` collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDisposition {
    /// The destination's administrators were kept; source rows were ignored.
    KeptExisting(usize),
    /// The destination had no administrators; the source's were used.
    FromSource(usize),
}

/// Outcome of a migration run. Never persisted.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub entries: Vec<ReportEntry>,
    pub admins: AdminDisposition,
    /// Record counts of the assembled document, per collection
    pub totals: Vec<(Collection, usize)>,
    /// Store the document was written to, `None` for a dry run
    pub written_to: Option<PathBuf>,
}

impl MigrationReport {
    pub fn failures(&self) -> impl Iterator<Item = (Collection, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            EntityOutcome::Failed(message) => Some((e.collection, message.as_str())),
            EntityOutcome::Migrated(_) => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn total_records(&self) -> usize {
        self.totals.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migration summary")?;
        writeln!(f, "  {:<20} {:<8} {:>8}", "entity", "status", "records")?;
        for entry in &self.entries {
            match &entry.outcome {
                EntityOutcome::Migrated(count) => writeln!(
                    f,
                    "  {:<20} {:<8} {:>8}",
                    entry.collection.as_str(),
                    "ok",
                    count
                )?,
                EntityOutcome::Failed(message) => {
                    writeln!(
                        f,
                        "  {:<20} {:<8} {:>8}",
                        entry.collection.as_str(),
                        "FAILED",
                        "-"
                    )?;
                    writeln!(f, "      {}", message)?;
                }
            }
        }

        match self.admins {
            AdminDisposition::KeptExisting(count) => writeln!(
                f,
                "Admins: kept {} existing administrator(s); source administrators ignored",
                count
            )?,
            AdminDisposition::FromSource(count) => writeln!(
                f,
                "Admins: destination had none; took {} from the source",
                count
            )?,
        }

        writeln!(f, "Totals")?;
        for (collection, count) in &self.totals {
            writeln!(f, "  {:<20} {:>8}", collection.as_str(), count)?;
        }
        writeln!(f, "  {:<20} {:>8}", "all", self.total_records())?;

        let failed = self.failures().count();
        if failed > 0 {
            writeln!(f, "Warning: {} of {} entities failed", failed, self.entries.len())?;
        }
        match &self.written_to {
            Some(path) => writeln!(f, "Written to {}", path.display()),
            None => writeln!(f, "Dry run: nothing written"),
        }
    }
}
