//! Relational-to-document migration.
//!
//! Every entity kind is migrated by the same routine: fetch all rows of one
//! legacy table, transform each row into a record, and contain any failure
//! at the boundary of that entity.

mod orchestrator;
mod report;
mod row;
mod transform;

pub use orchestrator::*;
pub use report::*;
pub use row::*;
pub use transform::*;

use std::future::Future;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{
    Admin, Agent, AppraisalBooking, Buyer, BuyerEnquiry, Collection, ContactInfo, ContactMessage,
    FreeGuide, GalleryItem, GuideDownload, Investor, Journey, Property, Record, Review,
};
use crate::source::{RelationalSource, SourceRow};

type RowTransform = fn(&RowReader<'_>) -> RowResult<Record>;

/// Migrator for one collection.
#[derive(Clone, Copy)]
pub struct EntityMigrator {
    collection: Collection,
    transform: RowTransform,
}

/// Terminal state of one entity's migration.
#[derive(Debug)]
pub struct EntityResult {
    pub collection: Collection,
    pub outcome: Result<Vec<Record>, AppError>,
}

impl EntityMigrator {
    fn of<T: FromSourceRow + Serialize>(collection: Collection) -> Self {
        Self {
            collection,
            transform: to_record::<T>,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Extract and transform this entity. Never fails: errors are captured
    /// in the returned result.
    pub async fn run<S: RelationalSource>(&self, source: &S) -> EntityResult {
        let table = self.collection().source_table();
        let outcome =
            extract_and_transform(self.collection, || source.fetch_all(table), self.transform)
                .await;

        match &outcome {
            Ok(records) => {
                tracing::info!("Migrated {} {} records", records.len(), self.collection)
            }
            Err(e) => tracing::warn!("Skipping {}: {}", self.collection, e.message()),
        }

        EntityResult {
            collection: self.collection,
            outcome,
        }
    }
}

/// Run `query` and map every returned row through `transform`.
///
/// Any error, from the query or from a single row, fails the whole entity
/// with an [`AppError::EntityMigration`].
pub async fn extract_and_transform<Q, Fut, F>(
    collection: Collection,
    query: Q,
    transform: F,
) -> Result<Vec<Record>, AppError>
where
    Q: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<SourceRow>, AppError>>,
    F: Fn(&RowReader<'_>) -> RowResult<Record>,
{
    let entity_error = |message: String| AppError::EntityMigration {
        entity: collection.to_string(),
        message,
    };

    let rows = query().await.map_err(|e| entity_error(e.message()))?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let reader = RowReader::new(row);
            transform(&reader)
                .map_err(|e| entity_error(format!("row {}{}: {}", idx + 1, reader.describe(), e)))
        })
        .collect()
}

/// The fourteen migrators, in document order.
pub fn migrators() -> [EntityMigrator; 14] {
    [
        EntityMigrator::of::<Admin>(Collection::Admins),
        EntityMigrator::of::<Agent>(Collection::Agents),
        EntityMigrator::of::<Property>(Collection::Properties),
        EntityMigrator::of::<Review>(Collection::Reviews),
        EntityMigrator::of::<GalleryItem>(Collection::GalleryItems),
        EntityMigrator::of::<Investor>(Collection::Investors),
        EntityMigrator::of::<Journey>(Collection::Journeys),
        EntityMigrator::of::<ContactInfo>(Collection::ContactInfo),
        EntityMigrator::of::<ContactMessage>(Collection::ContactMessages),
        EntityMigrator::of::<AppraisalBooking>(Collection::AppraisalBookings),
        EntityMigrator::of::<FreeGuide>(Collection::FreeGuides),
        EntityMigrator::of::<GuideDownload>(Collection::GuideDownloads),
        EntityMigrator::of::<Buyer>(Collection::Buyers),
        EntityMigrator::of::<BuyerEnquiry>(Collection::BuyerEnquiries),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SqlValue;
    use serde_json::json;

    fn gallery_row(id: i64, title: Option<&str>) -> SourceRow {
        let mut row = SourceRow::new();
        row.insert("id".to_string(), SqlValue::Int(id));
        row.insert(
            "title".to_string(),
            title.map_or(SqlValue::Null, |t| SqlValue::Text(t.to_string())),
        );
        row.insert(
            "image_url".to_string(),
            SqlValue::Text(format!("/uploads/{}.jpg", id)),
        );
        row.insert(
            "created_at".to_string(),
            SqlValue::Text("2023-02-01 00:00:00".to_string()),
        );
        row
    }

    #[test]
    fn test_migrators_cover_every_collection_once() {
        let collections: Vec<Collection> = migrators().iter().map(|m| m.collection()).collect();
        assert_eq!(collections, Collection::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_extract_and_transform_maps_rows() {
        let records = extract_and_transform(
            Collection::GalleryItems,
            || async {
                Ok::<_, AppError>(vec![gallery_row(1, Some("Kitchen")), gallery_row(2, Some("Deck"))])
            },
            to_record::<GalleryItem>,
        )
        .await
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["title"], json!("Deck"));
        assert_eq!(records[1]["displayOrder"], json!(0));
        assert_eq!(records[1]["caption"], json!(null));
    }

    #[tokio::test]
    async fn test_query_error_becomes_entity_error() {
        let err = extract_and_transform(
            Collection::Reviews,
            || async { Err::<Vec<SourceRow>, _>(AppError::Source("no such table: reviews".to_string())) },
            to_record::<Review>,
        )
        .await
        .unwrap_err();

        match err {
            AppError::EntityMigration { entity, message } => {
                assert_eq!(entity, "reviews");
                assert_eq!(message, "no such table: reviews");
            }
            other => panic!("expected EntityMigration, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_row_names_row_and_id() {
        let err = extract_and_transform(
            Collection::GalleryItems,
            || async { Ok::<_, AppError>(vec![gallery_row(1, Some("Kitchen")), gallery_row(9, None)]) },
            to_record::<GalleryItem>,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.message(),
            "galleryItems: row 2 (id 9): missing required column `title`"
        );
    }
}
