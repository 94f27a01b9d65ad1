//! MongoDB adapters for the store ports.
//!
//! Documents are typed (`HospitalDocument`, `ReviewDocument`) and validated
//! into domain records at this boundary; a stored document that violates a
//! domain constraint surfaces as [`StoreError::Decode`] instead of leaking
//! an unchecked record into the services.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinates;
use crate::domain::hospital::{Hospital, HospitalId, NewHospital};
use crate::domain::ports::{
    HospitalFilter, HospitalRepository, ReviewRepository, StoreDiagnostics, StoreError,
    StoreStatus,
};
use crate::domain::review::{NewReview, Rating, Review, ReviewId};

/// Collection holding hospital documents.
pub const HOSPITAL_COLLECTION: &str = "hospital";
/// Collection holding review documents.
pub const REVIEW_COLLECTION: &str = "review";

/// Handle over the configured database, from which the per-collection
/// adapters are derived.
///
/// The driver connects lazily: constructing the store validates the
/// connection string but does not require the server to be up. An
/// unreachable server surfaces per-operation as
/// [`StoreError::Unavailable`].
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parse the connection string and select the database.
    pub async fn connect(url: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await.map_err(map_driver_error)?;
        Ok(Self {
            db: client.database(database),
        })
    }

    /// Hospital-collection adapter.
    pub fn hospitals(&self) -> MongoHospitalRepository {
        MongoHospitalRepository {
            collection: self.db.collection(HOSPITAL_COLLECTION),
        }
    }

    /// Review-collection adapter.
    pub fn reviews(&self) -> MongoReviewRepository {
        MongoReviewRepository {
            collection: self.db.collection(REVIEW_COLLECTION),
        }
    }

    /// Diagnostics adapter for the `/test` endpoint.
    pub fn diagnostics(&self) -> MongoStoreDiagnostics {
        MongoStoreDiagnostics {
            db: self.db.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LocationDocument {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct HospitalDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    address: String,
    location: LocationDocument,
    #[serde(default)]
    specialties: Vec<String>,
    total_beds: i64,
    available_beds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl HospitalDocument {
    fn from_new(record: &NewHospital) -> Self {
        Self {
            id: None,
            name: record.name.clone(),
            address: record.address.clone(),
            location: LocationDocument {
                lat: record.location.lat(),
                lng: record.location.lng(),
            },
            specialties: record.specialties.clone(),
            total_beds: i64::from(record.total_beds),
            available_beds: i64::from(record.available_beds),
            image_url: record.image_url.clone(),
        }
    }

    fn into_domain(self) -> Result<Hospital, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::decode("hospital document missing _id"))?;
        let location = Coordinates::new(self.location.lat, self.location.lng)
            .map_err(|err| StoreError::decode(format!("hospital {id}: {err}")))?;
        let total_beds = u32::try_from(self.total_beds)
            .map_err(|_| StoreError::decode(format!("hospital {id}: negative total_beds")))?;
        let available_beds = u32::try_from(self.available_beds)
            .map_err(|_| StoreError::decode(format!("hospital {id}: negative available_beds")))?;
        let record = NewHospital::new(
            self.name,
            self.address,
            location,
            self.specialties,
            total_beds,
            available_beds,
            self.image_url,
        )
        .map_err(|err| StoreError::decode(format!("hospital {id}: {err}")))?;
        Ok(Hospital::from_new(HospitalId::from_object_id(id), record))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReviewDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    hospital_id: String,
    user_name: String,
    rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visit_date: Option<mongodb::bson::DateTime>,
}

impl ReviewDocument {
    fn from_new(record: &NewReview) -> Self {
        Self {
            id: None,
            hospital_id: record.hospital_id.clone(),
            user_name: record.user_name.clone(),
            rating: i64::from(record.rating.value()),
            comment: record.comment.clone(),
            visit_date: record.visit_date.map(mongodb::bson::DateTime::from_chrono),
        }
    }

    fn into_domain(self) -> Result<Review, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::decode("review document missing _id"))?;
        let rating = Rating::new(self.rating)
            .map_err(|err| StoreError::decode(format!("review {id}: {err}")))?;
        let record = NewReview::new(
            self.hospital_id,
            self.user_name,
            rating,
            self.comment,
            self.visit_date.map(mongodb::bson::DateTime::to_chrono),
        )
        .map_err(|err| StoreError::decode(format!("review {id}: {err}")))?;
        Ok(Review::from_new(ReviewId::from_object_id(id), record))
    }
}

/// [`HospitalRepository`] backed by the hospital collection.
#[derive(Clone)]
pub struct MongoHospitalRepository {
    collection: Collection<HospitalDocument>,
}

#[async_trait]
impl HospitalRepository for MongoHospitalRepository {
    async fn find(
        &self,
        filter: &HospitalFilter,
        limit: u32,
    ) -> Result<Vec<Hospital>, StoreError> {
        let query = match filter {
            HospitalFilter::All => doc! {},
            // Substring semantics via an unanchored case-insensitive regex,
            // matching the in-process predicate for plain specialty names.
            HospitalFilter::SpecialtyContains(needle) => doc! {
                "specialties": { "$regex": needle, "$options": "i" }
            },
        };
        let mut cursor = self
            .collection
            .find(query)
            .limit(i64::from(limit))
            .await
            .map_err(map_driver_error)?;
        let mut hospitals = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(map_driver_error)? {
            hospitals.push(document.into_domain()?);
        }
        Ok(hospitals)
    }

    async fn find_by_id(&self, id: &HospitalId) -> Result<Option<Hospital>, StoreError> {
        self.collection
            .find_one(doc! { "_id": id.object_id() })
            .await
            .map_err(map_driver_error)?
            .map(HospitalDocument::into_domain)
            .transpose()
    }

    async fn insert(&self, hospital: NewHospital) -> Result<HospitalId, StoreError> {
        let result = self
            .collection
            .insert_one(HospitalDocument::from_new(&hospital))
            .await
            .map_err(map_driver_error)?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(HospitalId::from_object_id(oid)),
            other => Err(StoreError::query(format!(
                "unexpected inserted id type: {other}"
            ))),
        }
    }

    async fn set_available_beds(
        &self,
        id: &HospitalId,
        available_beds: u32,
    ) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.object_id() },
                doc! { "$set": { "available_beds": i64::from(available_beds) } },
            )
            .await
            .map_err(map_driver_error)?;
        Ok(result.matched_count > 0)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_driver_error)
    }
}

/// [`ReviewRepository`] backed by the review collection.
#[derive(Clone)]
pub struct MongoReviewRepository {
    collection: Collection<ReviewDocument>,
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn find_for_hospital(
        &self,
        hospital_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Review>, StoreError> {
        let find = self
            .collection
            .find(doc! { "hospital_id": hospital_id })
            .limit(limit.map_or(0, i64::from));
        let mut cursor = find.await.map_err(map_driver_error)?;
        let mut reviews = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(map_driver_error)? {
            reviews.push(document.into_domain()?);
        }
        Ok(reviews)
    }

    async fn insert(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        let result = self
            .collection
            .insert_one(ReviewDocument::from_new(&review))
            .await
            .map_err(map_driver_error)?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(ReviewId::from_object_id(oid)),
            other => Err(StoreError::query(format!(
                "unexpected inserted id type: {other}"
            ))),
        }
    }
}

/// [`StoreDiagnostics`] answering with a live round trip to the server.
#[derive(Clone)]
pub struct MongoStoreDiagnostics {
    db: Database,
}

#[async_trait]
impl StoreDiagnostics for MongoStoreDiagnostics {
    async fn status(&self) -> StoreStatus {
        let mut status = StoreStatus {
            configured: true,
            database_name: Some(self.db.name().to_owned()),
            ..StoreStatus::default()
        };
        match self.db.list_collection_names().await {
            Ok(collections) => {
                status.reachable = true;
                status.collections = collections;
            }
            Err(err) => {
                status.error = Some(err.to_string());
            }
        }
        status
    }
}

/// Collapse driver failures onto the port taxonomy: connectivity-shaped
/// failures are `Unavailable`, everything else is `Query`.
fn map_driver_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::unavailable(err.to_string()),
        _ => StoreError::query(err.to_string()),
    }
}
