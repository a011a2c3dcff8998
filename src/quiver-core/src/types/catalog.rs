//! Versioned dtype catalog.

use common_config::ApiVersion;

use super::{DType, TimeUnit};

const INTEGER_DTYPES: [DType; 8] = [
    DType::Int64,
    DType::Int32,
    DType::Int16,
    DType::Int8,
    DType::UInt64,
    DType::UInt32,
    DType::UInt16,
    DType::UInt8,
];

const FLOAT_DTYPES: [DType; 2] = [DType::Float64, DType::Float32];

const TIME_UNITS: [TimeUnit; 4] = [
    TimeUnit::Millisecond,
    TimeUnit::Microsecond,
    TimeUnit::Nanosecond,
    TimeUnit::Second,
];

/// The dtypes a given API version advertises.
///
/// `V1` and `Main` currently advertise the same families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DTypeCatalog {
    version: ApiVersion,
}

impl DTypeCatalog {
    /// Catalog for an API version.
    pub const fn for_version(version: ApiVersion) -> Self {
        Self { version }
    }

    /// The API version of this catalog.
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    /// Every signed and unsigned integer dtype.
    pub fn integer_dtypes(&self) -> Vec<DType> {
        INTEGER_DTYPES.to_vec()
    }

    /// Every floating point dtype.
    pub fn float_dtypes(&self) -> Vec<DType> {
        FLOAT_DTYPES.to_vec()
    }

    /// Every dtype the catalog considers numeric.
    pub fn numeric_dtypes(&self) -> Vec<DType> {
        let mut dtypes = self.integer_dtypes();
        dtypes.extend(self.float_dtypes());
        dtypes
    }

    /// Units a datetime selector expands to when no unit is given.
    pub fn time_units(&self) -> &'static [TimeUnit] {
        &TIME_UNITS
    }
}
