//! Hospital aggregate and its identity type.

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::domain::geo::Coordinates;

/// Opaque, stable hospital identity.
///
/// The wire format is a 24-character hexadecimal ObjectId string; anything
/// else is rejected at parse time so downstream code never sees a malformed
/// id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HospitalId(ObjectId);

/// Raised when an incoming identifier is not a valid ObjectId string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed hospital id: {raw:?}")]
pub struct InvalidHospitalId {
    /// The rejected input, echoed back for diagnostics.
    pub raw: String,
}

impl HospitalId {
    /// Parse an identifier from its wire representation.
    pub fn parse(raw: &str) -> Result<Self, InvalidHospitalId> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidHospitalId { raw: raw.to_owned() })
    }

    /// Wrap an identifier produced by a store adapter.
    pub fn from_object_id(id: ObjectId) -> Self {
        Self(id)
    }

    /// The underlying ObjectId, for store adapters building queries.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Wire representation: lowercase hexadecimal.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl std::fmt::Display for HospitalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Constraint violations raised when constructing hospital records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HospitalValidationError {
    /// The hospital name is empty or whitespace.
    #[error("hospital name must not be empty")]
    EmptyName,
    /// The address is empty or whitespace.
    #[error("hospital address must not be empty")]
    EmptyAddress,
    /// `available_beds` exceeds `total_beds`.
    #[error("available beds ({available}) exceed total beds ({total})")]
    AvailableExceedsTotal {
        /// Offending available-bed count.
        available: u32,
        /// Total capacity it was checked against.
        total: u32,
    },
}

/// A hospital record before an identity has been assigned by the store.
///
/// Constructed only through [`NewHospital::new`], which enforces the
/// non-empty-name/address and `available_beds <= total_beds` invariants.
/// Coordinate ranges are enforced by [`Coordinates`] itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHospital {
    pub name: String,
    pub address: String,
    pub location: Coordinates,
    pub specialties: Vec<String>,
    pub total_beds: u32,
    pub available_beds: u32,
    pub image_url: Option<String>,
}

impl NewHospital {
    /// Validate and assemble a hospital record.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        location: Coordinates,
        specialties: Vec<String>,
        total_beds: u32,
        available_beds: u32,
        image_url: Option<String>,
    ) -> Result<Self, HospitalValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HospitalValidationError::EmptyName);
        }
        let address = address.into();
        if address.trim().is_empty() {
            return Err(HospitalValidationError::EmptyAddress);
        }
        if available_beds > total_beds {
            return Err(HospitalValidationError::AvailableExceedsTotal {
                available: available_beds,
                total: total_beds,
            });
        }
        Ok(Self {
            name,
            address,
            location,
            specialties,
            total_beds,
            available_beds,
            image_url,
        })
    }
}

/// A persisted hospital record.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub address: String,
    pub location: Coordinates,
    pub specialties: Vec<String>,
    pub total_beds: u32,
    pub available_beds: u32,
    pub image_url: Option<String>,
}

impl Hospital {
    /// Attach a store-assigned identity to a validated record.
    pub fn from_new(id: HospitalId, record: NewHospital) -> Self {
        let NewHospital {
            name,
            address,
            location,
            specialties,
            total_beds,
            available_beds,
            image_url,
        } = record;
        Self {
            id,
            name,
            address,
            location,
            specialties,
            total_beds,
            available_beds,
            image_url,
        }
    }

    /// Availability ratio used by recommendation scoring, in [0, 1].
    ///
    /// A zero-capacity hospital has ratio 0 rather than a division error.
    pub fn availability_ratio(&self) -> f64 {
        f64::from(self.available_beds) / f64::from(self.total_beds.max(1))
    }
}
