//! Idempotent sample-data seeding.
//!
//! The fixture set is deterministic: twelve hospitals clustered around New
//! Delhi and a fixed batch of reviews referencing them. Seeding only runs
//! against an empty hospital collection; a populated store is left
//! untouched and reported as-is. Races between concurrent seeders are
//! delegated to the database (spec: best-effort idempotent, not
//! transactional).

use std::sync::Arc;

use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::geo::Coordinates;
use crate::domain::hospital::NewHospital;
use crate::domain::ports::{HospitalRepository, ReviewRepository};
use crate::domain::review::{NewReview, Rating};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and has been populated.
    Seeded {
        /// Hospital count after seeding.
        hospitals: u64,
    },
    /// The collection already held data; nothing was written.
    AlreadyPopulated {
        /// Existing hospital count.
        hospitals: u64,
    },
}

/// Service that populates the store with the fixture data set.
#[derive(Clone)]
pub struct SeedingService {
    hospitals: Arc<dyn HospitalRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl SeedingService {
    /// Construct the service with its store adapters.
    pub fn new(hospitals: Arc<dyn HospitalRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { hospitals, reviews }
    }

    /// Populate the store when, and only when, it holds no hospitals.
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, DomainError> {
        let existing = self.hospitals.count().await?;
        if existing > 0 {
            return Ok(SeedOutcome::AlreadyPopulated {
                hospitals: existing,
            });
        }

        let mut inserted_ids = Vec::with_capacity(SEED_HOSPITALS.len());
        for entry in SEED_HOSPITALS {
            let id = self.hospitals.insert(entry.to_record()?).await?;
            inserted_ids.push(id);
        }

        for review in &SEED_REVIEWS {
            let Some(hospital_id) = inserted_ids.get(review.hospital_index) else {
                return Err(DomainError::internal("seed review references no hospital"));
            };
            self.reviews
                .insert(review.to_record(&hospital_id.to_hex())?)
                .await?;
        }

        let hospitals = self.hospitals.count().await?;
        info!(hospitals, reviews = SEED_REVIEWS.len(), "seeded sample data");
        Ok(SeedOutcome::Seeded { hospitals })
    }
}

struct SeedHospital {
    name: &'static str,
    address: &'static str,
    lat: f64,
    lng: f64,
    specialties: &'static [&'static str],
    total_beds: u32,
    available_beds: u32,
    image_url: &'static str,
}

impl SeedHospital {
    fn to_record(&self) -> Result<NewHospital, DomainError> {
        let location = Coordinates::new(self.lat, self.lng)
            .map_err(|err| DomainError::internal(format!("invalid seed location: {err}")))?;
        NewHospital::new(
            self.name,
            self.address,
            location,
            self.specialties.iter().map(|s| (*s).to_owned()).collect(),
            self.total_beds,
            self.available_beds,
            Some(self.image_url.to_owned()),
        )
        .map_err(|err| DomainError::internal(format!("invalid seed hospital: {err}")))
    }
}

struct SeedReview {
    hospital_index: usize,
    user_name: &'static str,
    rating: i64,
    comment: &'static str,
}

impl SeedReview {
    fn to_record(&self, hospital_id: &str) -> Result<NewReview, DomainError> {
        let rating = Rating::new(self.rating)
            .map_err(|err| DomainError::internal(format!("invalid seed rating: {err}")))?;
        NewReview::new(
            hospital_id,
            self.user_name,
            rating,
            Some(self.comment.to_owned()),
            None,
        )
        .map_err(|err| DomainError::internal(format!("invalid seed review: {err}")))
    }
}

const IMG_RED_CROSS: &str = "https://images.unsplash.com/photo-1586773860418-d37222d8fce3";
const IMG_WARD: &str = "https://images.unsplash.com/photo-1584433144859-1fc3ab64a957";
const IMG_FACADE: &str = "https://images.unsplash.com/photo-1576765608648-8c36509f63a3";
const IMG_CORRIDOR: &str = "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d";

// Locations stay within about 0.2 degrees of central Delhi (28.6139,
// 77.2090) so the default nearby radius covers most of the set.
const SEED_HOSPITALS: [SeedHospital; 12] = [
    SeedHospital {
        name: "CityCare Hospital 1",
        address: "100, Healthcare Ave, Sector 2, Delhi",
        lat: 28.6421,
        lng: 77.1705,
        specialties: &["Cardiology", "Emergency", "Orthopedics"],
        total_beds: 220,
        available_beds: 74,
        image_url: IMG_RED_CROSS,
    },
    SeedHospital {
        name: "CityCare Hospital 2",
        address: "101, Healthcare Ave, Sector 3, Delhi",
        lat: 28.5712,
        lng: 77.2484,
        specialties: &["Neurology", "Psychiatry"],
        total_beds: 140,
        available_beds: 12,
        image_url: IMG_WARD,
    },
    SeedHospital {
        name: "CityCare Hospital 3",
        address: "102, Healthcare Ave, Sector 4, Delhi",
        lat: 28.7038,
        lng: 77.1124,
        specialties: &["Pediatrics", "Gynecology", "Dermatology"],
        total_beds: 180,
        available_beds: 95,
        image_url: IMG_FACADE,
    },
    SeedHospital {
        name: "CityCare Hospital 4",
        address: "103, Healthcare Ave, Sector 5, Delhi",
        lat: 28.6577,
        lng: 77.3021,
        specialties: &["Oncology", "Gastroenterology", "Cardiology", "Emergency"],
        total_beds: 300,
        available_beds: 141,
        image_url: IMG_CORRIDOR,
    },
    SeedHospital {
        name: "CityCare Hospital 5",
        address: "104, Healthcare Ave, Sector 6, Delhi",
        lat: 28.5390,
        lng: 77.1552,
        specialties: &["Emergency", "Orthopedics"],
        total_beds: 90,
        available_beds: 0,
        image_url: IMG_RED_CROSS,
    },
    SeedHospital {
        name: "CityCare Hospital 6",
        address: "105, Healthcare Ave, Sector 7, Delhi",
        lat: 28.6808,
        lng: 77.2266,
        specialties: &["Cardiology", "Neurology", "Oncology"],
        total_beds: 260,
        available_beds: 203,
        image_url: IMG_WARD,
    },
    SeedHospital {
        name: "CityCare Hospital 7",
        address: "106, Healthcare Ave, Sector 8, Delhi",
        lat: 28.6013,
        lng: 77.3359,
        specialties: &["Dermatology", "Psychiatry"],
        total_beds: 70,
        available_beds: 28,
        image_url: IMG_FACADE,
    },
    SeedHospital {
        name: "CityCare Hospital 8",
        address: "107, Healthcare Ave, Sector 9, Delhi",
        lat: 28.7331,
        lng: 77.2548,
        specialties: &["Gynecology", "Pediatrics", "Emergency"],
        total_beds: 160,
        available_beds: 57,
        image_url: IMG_CORRIDOR,
    },
    SeedHospital {
        name: "CityCare Hospital 9",
        address: "108, Healthcare Ave, Sector 10, Delhi",
        lat: 28.4974,
        lng: 77.2861,
        specialties: &["Gastroenterology", "Oncology"],
        total_beds: 120,
        available_beds: 44,
        image_url: IMG_RED_CROSS,
    },
    SeedHospital {
        name: "CityCare Hospital 10",
        address: "109, Healthcare Ave, Sector 11, Delhi",
        lat: 28.6244,
        lng: 77.0897,
        specialties: &["Cardiology", "Gastroenterology", "Psychiatry"],
        total_beds: 200,
        available_beds: 118,
        image_url: IMG_WARD,
    },
    SeedHospital {
        name: "CityCare Hospital 11",
        address: "110, Healthcare Ave, Sector 12, Delhi",
        lat: 28.7725,
        lng: 77.1831,
        specialties: &["Neurology", "Orthopedics", "Emergency"],
        total_beds: 240,
        available_beds: 9,
        image_url: IMG_FACADE,
    },
    SeedHospital {
        name: "CityCare Hospital 12",
        address: "111, Healthcare Ave, Sector 13, Delhi",
        lat: 28.5648,
        lng: 77.3594,
        specialties: &["Pediatrics", "Dermatology", "Gynecology", "Oncology"],
        total_beds: 110,
        available_beds: 66,
        image_url: IMG_CORRIDOR,
    },
];

const SEED_REVIEWS: [SeedReview; 18] = [
    SeedReview {
        hospital_index: 0,
        user_name: "Aarav",
        rating: 5,
        comment: "Great staff and quick response.",
    },
    SeedReview {
        hospital_index: 0,
        user_name: "Diya",
        rating: 4,
        comment: "Clean and well maintained.",
    },
    SeedReview {
        hospital_index: 1,
        user_name: "Vihaan",
        rating: 3,
        comment: "Slightly crowded but service is good.",
    },
    SeedReview {
        hospital_index: 2,
        user_name: "Sara",
        rating: 5,
        comment: "Doctors are very attentive.",
    },
    SeedReview {
        hospital_index: 2,
        user_name: "Arjun",
        rating: 4,
        comment: "Great staff and quick response.",
    },
    SeedReview {
        hospital_index: 2,
        user_name: "Maya",
        rating: 4,
        comment: "Clean and well maintained.",
    },
    SeedReview {
        hospital_index: 3,
        user_name: "Aarav",
        rating: 4,
        comment: "Doctors are very attentive.",
    },
    SeedReview {
        hospital_index: 4,
        user_name: "Diya",
        rating: 3,
        comment: "Slightly crowded but service is good.",
    },
    SeedReview {
        hospital_index: 5,
        user_name: "Vihaan",
        rating: 5,
        comment: "Great staff and quick response.",
    },
    SeedReview {
        hospital_index: 5,
        user_name: "Sara",
        rating: 5,
        comment: "Clean and well maintained.",
    },
    SeedReview {
        hospital_index: 6,
        user_name: "Arjun",
        rating: 3,
        comment: "Slightly crowded but service is good.",
    },
    SeedReview {
        hospital_index: 7,
        user_name: "Maya",
        rating: 4,
        comment: "Doctors are very attentive.",
    },
    SeedReview {
        hospital_index: 8,
        user_name: "Aarav",
        rating: 4,
        comment: "Clean and well maintained.",
    },
    SeedReview {
        hospital_index: 9,
        user_name: "Diya",
        rating: 5,
        comment: "Great staff and quick response.",
    },
    SeedReview {
        hospital_index: 9,
        user_name: "Vihaan",
        rating: 4,
        comment: "Doctors are very attentive.",
    },
    SeedReview {
        hospital_index: 10,
        user_name: "Sara",
        rating: 3,
        comment: "Slightly crowded but service is good.",
    },
    SeedReview {
        hospital_index: 11,
        user_name: "Arjun",
        rating: 5,
        comment: "Clean and well maintained.",
    },
    SeedReview {
        hospital_index: 11,
        user_name: "Maya",
        rating: 4,
        comment: "Great staff and quick response.",
    },
];
