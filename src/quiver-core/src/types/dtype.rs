//! Logical column dtypes and their arrow translation.

use std::str::FromStr;
use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowDataType, Field, TimeUnit as ArrowTimeUnit};
use common_error::{QuiverError, QuiverResult};
use serde::{Deserialize, Serialize};

/// Time zone token that matches any *set* time zone.
pub const ANY_TIME_ZONE: &str = "*";

/// Resolution of a datetime or duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds.
    Second,
    /// Milliseconds.
    Millisecond,
    /// Microseconds.
    Microsecond,
    /// Nanoseconds.
    Nanosecond,
}

impl TimeUnit {
    /// Short token for this unit (`"s"`, `"ms"`, `"us"`, `"ns"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    fn to_arrow(self) -> ArrowTimeUnit {
        match self {
            Self::Second => ArrowTimeUnit::Second,
            Self::Millisecond => ArrowTimeUnit::Millisecond,
            Self::Microsecond => ArrowTimeUnit::Microsecond,
            Self::Nanosecond => ArrowTimeUnit::Nanosecond,
        }
    }

    fn from_arrow(unit: &ArrowTimeUnit) -> Self {
        match unit {
            ArrowTimeUnit::Second => Self::Second,
            ArrowTimeUnit::Millisecond => Self::Millisecond,
            ArrowTimeUnit::Microsecond => Self::Microsecond,
            ArrowTimeUnit::Nanosecond => Self::Nanosecond,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = QuiverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Self::Second),
            "ms" => Ok(Self::Millisecond),
            "us" => Ok(Self::Microsecond),
            "ns" => Ok(Self::Nanosecond),
            other => Err(QuiverError::invalid_parameter(format!(
                "invalid time unit '{other}', expected one of 's', 'ms', 'us', 'ns'"
            ))),
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical dtype of a column.
///
/// Parametrized dtypes (`Datetime`, `Duration`, `List`) compare by their
/// parameters; use [`DTypeKind`] to match a whole family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
    /// Dictionary-encoded string.
    Categorical,
    /// Calendar date.
    Date,
    /// Timestamp with unit and optional time zone.
    Datetime {
        /// Resolution.
        time_unit: TimeUnit,
        /// IANA zone or fixed offset; `None` for naive timestamps.
        time_zone: Option<String>,
    },
    /// Elapsed time with unit.
    Duration(TimeUnit),
    /// Raw bytes.
    Binary,
    /// Variable-length list.
    List(Box<Self>),
    /// A backend type with no logical counterpart.
    Unknown,
}

impl DType {
    /// Construct a datetime dtype.
    pub fn datetime(time_unit: TimeUnit, time_zone: Option<&str>) -> Self {
        Self::Datetime {
            time_unit,
            time_zone: time_zone.map(str::to_string),
        }
    }

    /// The family this dtype belongs to.
    pub const fn kind(&self) -> DTypeKind {
        match self {
            Self::Int8 => DTypeKind::Int8,
            Self::Int16 => DTypeKind::Int16,
            Self::Int32 => DTypeKind::Int32,
            Self::Int64 => DTypeKind::Int64,
            Self::UInt8 => DTypeKind::UInt8,
            Self::UInt16 => DTypeKind::UInt16,
            Self::UInt32 => DTypeKind::UInt32,
            Self::UInt64 => DTypeKind::UInt64,
            Self::Float32 => DTypeKind::Float32,
            Self::Float64 => DTypeKind::Float64,
            Self::String => DTypeKind::String,
            Self::Boolean => DTypeKind::Boolean,
            Self::Categorical => DTypeKind::Categorical,
            Self::Date => DTypeKind::Date,
            Self::Datetime { .. } => DTypeKind::Datetime,
            Self::Duration(_) => DTypeKind::Duration,
            Self::Binary => DTypeKind::Binary,
            Self::List(_) => DTypeKind::List,
            Self::Unknown => DTypeKind::Unknown,
        }
    }

    /// Check if this type is an integer type.
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Check if this type is a floating point type.
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Check if this type is numeric.
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if this type is a temporal type.
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime { .. } | Self::Duration(_))
    }

    /// Check whether `self`, used as a pattern, matches the dtype `actual`.
    ///
    /// Equal dtypes match. A datetime pattern with the `"*"` zone also matches
    /// any datetime of the same unit whose zone is set.
    pub fn matches(&self, actual: &Self) -> bool {
        match (self, actual) {
            (
                Self::Datetime {
                    time_unit: unit_l,
                    time_zone: tz_l,
                },
                Self::Datetime {
                    time_unit: unit_r,
                    time_zone: tz_r,
                },
            ) => {
                unit_l == unit_r
                    && (tz_l == tz_r
                        || (tz_r.is_some() && tz_l.as_deref() == Some(ANY_TIME_ZONE)))
            }
            _ => self == actual,
        }
    }

    /// Translate an arrow data type.
    pub fn from_arrow(data_type: &ArrowDataType) -> Self {
        match data_type {
            ArrowDataType::Int8 => Self::Int8,
            ArrowDataType::Int16 => Self::Int16,
            ArrowDataType::Int32 => Self::Int32,
            ArrowDataType::Int64 => Self::Int64,
            ArrowDataType::UInt8 => Self::UInt8,
            ArrowDataType::UInt16 => Self::UInt16,
            ArrowDataType::UInt32 => Self::UInt32,
            ArrowDataType::UInt64 => Self::UInt64,
            ArrowDataType::Float32 => Self::Float32,
            ArrowDataType::Float64 => Self::Float64,
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 | ArrowDataType::Utf8View => {
                Self::String
            }
            ArrowDataType::Boolean => Self::Boolean,
            ArrowDataType::Dictionary(_, value) if is_arrow_string(value) => Self::Categorical,
            ArrowDataType::Date32 | ArrowDataType::Date64 => Self::Date,
            ArrowDataType::Timestamp(unit, tz) => Self::Datetime {
                time_unit: TimeUnit::from_arrow(unit),
                time_zone: tz.as_deref().map(str::to_string),
            },
            ArrowDataType::Duration(unit) => Self::Duration(TimeUnit::from_arrow(unit)),
            ArrowDataType::Binary | ArrowDataType::LargeBinary | ArrowDataType::BinaryView => {
                Self::Binary
            }
            ArrowDataType::List(field) | ArrowDataType::LargeList(field) => {
                Self::List(Box::new(Self::from_arrow(field.data_type())))
            }
            _ => Self::Unknown,
        }
    }

    /// Translate to the arrow data type used to materialize this dtype.
    pub fn to_arrow(&self) -> QuiverResult<ArrowDataType> {
        let data_type = match self {
            Self::Int8 => ArrowDataType::Int8,
            Self::Int16 => ArrowDataType::Int16,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            Self::UInt8 => ArrowDataType::UInt8,
            Self::UInt16 => ArrowDataType::UInt16,
            Self::UInt32 => ArrowDataType::UInt32,
            Self::UInt64 => ArrowDataType::UInt64,
            Self::Float32 => ArrowDataType::Float32,
            Self::Float64 => ArrowDataType::Float64,
            Self::String => ArrowDataType::Utf8,
            Self::Boolean => ArrowDataType::Boolean,
            Self::Categorical => ArrowDataType::Dictionary(
                Box::new(ArrowDataType::UInt32),
                Box::new(ArrowDataType::Utf8),
            ),
            Self::Date => ArrowDataType::Date32,
            Self::Datetime {
                time_unit,
                time_zone,
            } => {
                if time_zone.as_deref() == Some(ANY_TIME_ZONE) {
                    return Err(QuiverError::type_error(
                        "the '*' time zone is a pattern, not a concrete dtype",
                    ));
                }
                ArrowDataType::Timestamp(time_unit.to_arrow(), time_zone.as_deref().map(Arc::from))
            }
            Self::Duration(unit) => ArrowDataType::Duration(unit.to_arrow()),
            Self::Binary => ArrowDataType::Binary,
            Self::List(inner) => {
                ArrowDataType::List(Arc::new(Field::new("item", inner.to_arrow()?, true)))
            }
            Self::Unknown => {
                return Err(QuiverError::type_error("Unknown dtype has no arrow type"));
            }
        };
        Ok(data_type)
    }
}

fn is_arrow_string(data_type: &ArrowDataType) -> bool {
    matches!(
        data_type,
        ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 | ArrowDataType::Utf8View
    )
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Datetime {
                time_unit,
                time_zone: Some(tz),
            } => write!(f, "Datetime({time_unit}, {tz})"),
            Self::Datetime {
                time_unit,
                time_zone: None,
            } => write!(f, "Datetime({time_unit})"),
            Self::Duration(unit) => write!(f, "Duration({unit})"),
            Self::List(inner) => write!(f, "List({inner})"),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}

/// Dtype family, ignoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Boolean,
    Categorical,
    Date,
    Datetime,
    Duration,
    Binary,
    List,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("ms".parse::<TimeUnit>().unwrap(), TimeUnit::Millisecond);
        assert_eq!("ns".parse::<TimeUnit>().unwrap(), TimeUnit::Nanosecond);

        let err = "hours".parse::<TimeUnit>().unwrap_err();
        assert!(matches!(err, QuiverError::InvalidParameter(_)));
        assert!(err.to_string().contains("hours"));
    }

    #[test]
    fn test_kind_ignores_parameters() {
        let berlin = DType::datetime(TimeUnit::Microsecond, Some("Europe/Berlin"));
        let naive = DType::datetime(TimeUnit::Second, None);

        assert_ne!(berlin, naive);
        assert_eq!(berlin.kind(), naive.kind());
        assert_eq!(DType::List(Box::new(DType::Int8)).kind(), DTypeKind::List);
    }

    #[test]
    fn test_datetime_wildcard_matching() {
        let any_zone = DType::datetime(TimeUnit::Microsecond, Some(ANY_TIME_ZONE));

        assert!(any_zone.matches(&DType::datetime(TimeUnit::Microsecond, Some("UTC"))));
        assert!(!any_zone.matches(&DType::datetime(TimeUnit::Microsecond, None)));
        assert!(!any_zone.matches(&DType::datetime(TimeUnit::Nanosecond, Some("UTC"))));

        let utc = DType::datetime(TimeUnit::Microsecond, Some("UTC"));
        assert!(!utc.matches(&any_zone));
    }

    #[test]
    fn test_from_arrow() {
        assert_eq!(DType::from_arrow(&ArrowDataType::LargeUtf8), DType::String);
        assert_eq!(
            DType::from_arrow(&ArrowDataType::Dictionary(
                Box::new(ArrowDataType::Int32),
                Box::new(ArrowDataType::Utf8)
            )),
            DType::Categorical
        );
        assert_eq!(
            DType::from_arrow(&ArrowDataType::Timestamp(
                ArrowTimeUnit::Millisecond,
                Some("UTC".into())
            )),
            DType::datetime(TimeUnit::Millisecond, Some("UTC"))
        );
        assert_eq!(DType::from_arrow(&ArrowDataType::Float16), DType::Unknown);
    }

    #[test]
    fn test_to_arrow() {
        assert_eq!(DType::Boolean.to_arrow().unwrap(), ArrowDataType::Boolean);
        assert_eq!(
            DType::datetime(TimeUnit::Nanosecond, None).to_arrow().unwrap(),
            ArrowDataType::Timestamp(ArrowTimeUnit::Nanosecond, None)
        );
        assert!(DType::Unknown.to_arrow().is_err());
        assert!(
            DType::datetime(TimeUnit::Second, Some(ANY_TIME_ZONE))
                .to_arrow()
                .is_err()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::Int64.to_string(), "Int64");
        assert_eq!(
            DType::datetime(TimeUnit::Microsecond, Some("UTC")).to_string(),
            "Datetime(us, UTC)"
        );
        assert_eq!(DType::List(Box::new(DType::String)).to_string(), "List(String)");
    }
}
