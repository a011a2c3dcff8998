//! Datetime selector resolution.
//!
//! Expands optional/scalar/collection unit and zone specifiers into the
//! concrete set of datetime dtypes a selector should match.

use arrow::array::timezone::Tz;
use common_config::ApiVersion;
use common_error::{QuiverError, QuiverResult};

use super::{ANY_TIME_ZONE, DType, DTypeCatalog, TimeUnit};

/// Which time units to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeUnitSpec {
    /// Every unit the catalog knows.
    #[default]
    Any,
    /// A single unit token (`"s"`, `"ms"`, `"us"`, `"ns"`).
    One(String),
    /// Several unit tokens.
    Many(Vec<String>),
}

impl From<&str> for TimeUnitSpec {
    fn from(unit: &str) -> Self {
        Self::One(unit.to_string())
    }
}

impl From<TimeUnit> for TimeUnitSpec {
    fn from(unit: TimeUnit) -> Self {
        Self::One(unit.as_str().to_string())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for TimeUnitSpec {
    fn from(units: Vec<S>) -> Self {
        Self::Many(units.iter().map(|u| u.as_ref().to_string()).collect())
    }
}

/// Which time zones to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeZoneSpec {
    /// Any set zone or a naive timestamp.
    #[default]
    Any,
    /// A single zone; `None` selects naive timestamps only.
    One(Option<String>),
    /// Several zones; `None` entries select naive timestamps.
    Many(Vec<Option<String>>),
}

impl From<&str> for TimeZoneSpec {
    fn from(zone: &str) -> Self {
        Self::One(Some(zone.to_string()))
    }
}

impl From<Option<&str>> for TimeZoneSpec {
    fn from(zone: Option<&str>) -> Self {
        Self::One(zone.map(str::to_string))
    }
}

impl From<Vec<Option<&str>>> for TimeZoneSpec {
    fn from(zones: Vec<Option<&str>>) -> Self {
        Self::Many(zones.into_iter().map(|z| z.map(str::to_string)).collect())
    }
}

/// Resolve unit and zone specifiers to datetime dtypes.
///
/// The result is the unit-major cross product of units and zones, without
/// duplicates. Unknown unit tokens and unknown zones fail with
/// `InvalidParameter`.
pub fn resolve_datetime_selector(
    time_unit: &TimeUnitSpec,
    time_zone: &TimeZoneSpec,
    version: ApiVersion,
) -> QuiverResult<Vec<DType>> {
    let catalog = DTypeCatalog::for_version(version);

    let units: Vec<TimeUnit> = match time_unit {
        TimeUnitSpec::Any => catalog.time_units().to_vec(),
        TimeUnitSpec::One(token) => vec![token.parse()?],
        TimeUnitSpec::Many(tokens) => tokens
            .iter()
            .map(|token| token.parse())
            .collect::<QuiverResult<_>>()?,
    };

    let zones: Vec<Option<String>> = match time_zone {
        TimeZoneSpec::Any => vec![Some(ANY_TIME_ZONE.to_string()), None],
        TimeZoneSpec::One(zone) => vec![validate_time_zone(zone.as_deref())?],
        TimeZoneSpec::Many(zones) => zones
            .iter()
            .map(|zone| validate_time_zone(zone.as_deref()))
            .collect::<QuiverResult<_>>()?,
    };

    let mut dtypes = Vec::with_capacity(units.len() * zones.len());
    for unit in &units {
        for zone in &zones {
            let dtype = DType::Datetime {
                time_unit: *unit,
                time_zone: zone.clone(),
            };
            if !dtypes.contains(&dtype) {
                dtypes.push(dtype);
            }
        }
    }
    Ok(dtypes)
}

fn validate_time_zone(zone: Option<&str>) -> QuiverResult<Option<String>> {
    match zone {
        None => Ok(None),
        Some(ANY_TIME_ZONE) => Ok(Some(ANY_TIME_ZONE.to_string())),
        Some(tz) => {
            tz.parse::<Tz>().map_err(|e| {
                QuiverError::invalid_parameter(format!("invalid time zone '{tz}': {e}"))
            })?;
            Ok(Some(tz.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unit_single_zone() {
        let dtypes = resolve_datetime_selector(
            &TimeUnitSpec::from("ms"),
            &TimeZoneSpec::from("UTC"),
            ApiVersion::Main,
        )
        .unwrap();

        assert_eq!(dtypes, vec![DType::datetime(TimeUnit::Millisecond, Some("UTC"))]);
    }

    #[test]
    fn test_any_expands_to_cross_product() {
        let dtypes =
            resolve_datetime_selector(&TimeUnitSpec::Any, &TimeZoneSpec::Any, ApiVersion::V1)
                .unwrap();

        assert_eq!(dtypes.len(), 8);
        assert_eq!(dtypes[0], DType::datetime(TimeUnit::Millisecond, Some(ANY_TIME_ZONE)));
        assert_eq!(dtypes[1], DType::datetime(TimeUnit::Millisecond, None));
    }

    #[test]
    fn test_naive_only() {
        let dtypes = resolve_datetime_selector(
            &TimeUnitSpec::from(vec!["us", "ns"]),
            &TimeZoneSpec::One(None),
            ApiVersion::Main,
        )
        .unwrap();

        assert_eq!(
            dtypes,
            vec![
                DType::datetime(TimeUnit::Microsecond, None),
                DType::datetime(TimeUnit::Nanosecond, None),
            ]
        );
    }

    #[test]
    fn test_offsets_and_iana_zones_are_accepted() {
        let dtypes = resolve_datetime_selector(
            &TimeUnitSpec::from(TimeUnit::Second),
            &TimeZoneSpec::from(vec![Some("+01:00"), Some("Europe/Berlin"), None]),
            ApiVersion::Main,
        )
        .unwrap();
        assert_eq!(dtypes.len(), 3);
    }

    #[test]
    fn test_invalid_unit() {
        let err = resolve_datetime_selector(
            &TimeUnitSpec::from(vec!["ms", "fortnight"]),
            &TimeZoneSpec::Any,
            ApiVersion::Main,
        )
        .unwrap_err();
        assert!(matches!(err, QuiverError::InvalidParameter(_)));
        assert!(err.to_string().contains("fortnight"));
    }

    #[test]
    fn test_invalid_zone() {
        let err = resolve_datetime_selector(
            &TimeUnitSpec::Any,
            &TimeZoneSpec::from("Mars/Olympus_Mons"),
            ApiVersion::Main,
        )
        .unwrap_err();
        assert!(matches!(err, QuiverError::InvalidParameter(_)));
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_duplicate_units_collapse() {
        let dtypes = resolve_datetime_selector(
            &TimeUnitSpec::from(vec!["ms", "ms"]),
            &TimeZoneSpec::One(None),
            ApiVersion::Main,
        )
        .unwrap();
        assert_eq!(dtypes.len(), 1);
    }
}
