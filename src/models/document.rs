//! Document model: the whole persisted state of the site.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record inside a collection.
pub type Record = Map<String, Value>;

/// The fourteen fixed collections of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Admins,
    Agents,
    Properties,
    Reviews,
    GalleryItems,
    Investors,
    Journeys,
    ContactInfo,
    ContactMessages,
    AppraisalBookings,
    FreeGuides,
    GuideDownloads,
    Buyers,
    BuyerEnquiries,
}

impl Collection {
    /// Every collection, in document order.
    pub const ALL: [Collection; 14] = [
        Collection::Admins,
        Collection::Agents,
        Collection::Properties,
        Collection::Reviews,
        Collection::GalleryItems,
        Collection::Investors,
        Collection::Journeys,
        Collection::ContactInfo,
        Collection::ContactMessages,
        Collection::AppraisalBookings,
        Collection::FreeGuides,
        Collection::GuideDownloads,
        Collection::Buyers,
        Collection::BuyerEnquiries,
    ];

    /// Key of the collection in the backing file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Admins => "admins",
            Collection::Agents => "agents",
            Collection::Properties => "properties",
            Collection::Reviews => "reviews",
            Collection::GalleryItems => "galleryItems",
            Collection::Investors => "investors",
            Collection::Journeys => "journeys",
            Collection::ContactInfo => "contactInfo",
            Collection::ContactMessages => "contactMessages",
            Collection::AppraisalBookings => "appraisalBookings",
            Collection::FreeGuides => "freeGuides",
            Collection::GuideDownloads => "guideDownloads",
            Collection::Buyers => "buyers",
            Collection::BuyerEnquiries => "buyerEnquiries",
        }
    }

    /// Table holding this entity in the legacy database.
    pub fn source_table(&self) -> &'static str {
        match self {
            Collection::Admins => "admins",
            Collection::Agents => "agents",
            Collection::Properties => "properties",
            Collection::Reviews => "reviews",
            Collection::GalleryItems => "gallery_items",
            Collection::Investors => "investors",
            Collection::Journeys => "journeys",
            Collection::ContactInfo => "contact_info",
            Collection::ContactMessages => "contact_messages",
            Collection::AppraisalBookings => "appraisal_bookings",
            Collection::FreeGuides => "free_guides",
            Collection::GuideDownloads => "guide_downloads",
            Collection::Buyers => "buyers",
            Collection::BuyerEnquiries => "buyer_enquiries",
        }
    }

}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Collection::ALL.iter().map(|c| c.as_str()).collect();
                format!(
                    "unknown collection `{}`, expected one of: {}",
                    s,
                    known.join(", ")
                )
            })
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root document containing all application data.
///
/// Every collection is always present; keys missing from the file load as
/// empty collections. Top-level keys outside the fourteen collections are kept
/// in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub admins: Vec<Record>,
    #[serde(default)]
    pub agents: Vec<Record>,
    #[serde(default)]
    pub properties: Vec<Record>,
    #[serde(default)]
    pub reviews: Vec<Record>,
    #[serde(default)]
    pub gallery_items: Vec<Record>,
    #[serde(default)]
    pub investors: Vec<Record>,
    #[serde(default)]
    pub journeys: Vec<Record>,
    #[serde(default)]
    pub contact_info: Vec<Record>,
    #[serde(default)]
    pub contact_messages: Vec<Record>,
    #[serde(default)]
    pub appraisal_bookings: Vec<Record>,
    #[serde(default)]
    pub free_guides: Vec<Record>,
    #[serde(default)]
    pub guide_downloads: Vec<Record>,
    #[serde(default)]
    pub buyers: Vec<Record>,
    #[serde(default)]
    pub buyer_enquiries: Vec<Record>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub key_order: KeyOrder,
}

/// Top-level key order of the file a document was read from.
///
/// Only affects how the document is written back; two documents that differ
/// in key order alone compare equal.
#[derive(Debug, Clone, Default)]
pub struct KeyOrder(Vec<String>);

impl KeyOrder {
    fn rank(&self, key: &str) -> usize {
        self.0.iter().position(|k| k == key).unwrap_or(usize::MAX)
    }
}

impl PartialEq for KeyOrder {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Document {
    pub fn collection(&self, collection: Collection) -> &Vec<Record> {
        match collection {
            Collection::Admins => &self.admins,
            Collection::Agents => &self.agents,
            Collection::Properties => &self.properties,
            Collection::Reviews => &self.reviews,
            Collection::GalleryItems => &self.gallery_items,
            Collection::Investors => &self.investors,
            Collection::Journeys => &self.journeys,
            Collection::ContactInfo => &self.contact_info,
            Collection::ContactMessages => &self.contact_messages,
            Collection::AppraisalBookings => &self.appraisal_bookings,
            Collection::FreeGuides => &self.free_guides,
            Collection::GuideDownloads => &self.guide_downloads,
            Collection::Buyers => &self.buyers,
            Collection::BuyerEnquiries => &self.buyer_enquiries,
        }
    }

    pub fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Admins => &mut self.admins,
            Collection::Agents => &mut self.agents,
            Collection::Properties => &mut self.properties,
            Collection::Reviews => &mut self.reviews,
            Collection::GalleryItems => &mut self.gallery_items,
            Collection::Investors => &mut self.investors,
            Collection::Journeys => &mut self.journeys,
            Collection::ContactInfo => &mut self.contact_info,
            Collection::ContactMessages => &mut self.contact_messages,
            Collection::AppraisalBookings => &mut self.appraisal_bookings,
            Collection::FreeGuides => &mut self.free_guides,
            Collection::GuideDownloads => &mut self.guide_downloads,
            Collection::Buyers => &mut self.buyers,
            Collection::BuyerEnquiries => &mut self.buyer_enquiries,
        }
    }

    /// Build a document from parsed JSON, remembering its top-level key order.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let keys = value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();
        let mut document: Document = serde_json::from_value(value)?;
        document.key_order = KeyOrder(keys);
        Ok(document)
    }

    /// Serialize with top-level keys in the order they were read in. Keys the
    /// source file did not have follow in document order.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let object = match serde_json::to_value(self)? {
            Value::Object(object) => object,
            other => return Ok(other),
        };

        let mut entries: Vec<(String, Value)> = object.into_iter().collect();
        entries.sort_by_key(|(key, _)| self.key_order.rank(key));
        Ok(Value::Object(entries.into_iter().collect()))
    }

    /// Record count per collection, in document order.
    pub fn totals(&self) -> Vec<(Collection, usize)> {
        Collection::ALL
            .into_iter()
            .map(|c| (c, self.collection(c).len()))
            .collect()
    }
}
