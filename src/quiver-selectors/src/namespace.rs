//! Selector factory.

use common_config::QuiverConfig;
use common_error::QuiverResult;
use quiver_core::{
    DType, DTypeMatcher, DTypeSet, TimeUnitSpec, TimeZoneSpec, resolve_datetime_selector,
};

use crate::context::SelectorContext;
use crate::selector::{Selector, SelectorNode};

/// Dtypes selected by [`SelectorNamespace::numeric`].
pub const NUMERIC_DTYPES: [DType; 10] = [
    DType::Int64,
    DType::Int32,
    DType::Int16,
    DType::Int8,
    DType::UInt64,
    DType::UInt32,
    DType::UInt16,
    DType::UInt8,
    DType::Float64,
    DType::Float32,
];

/// Builds selectors for one [`SelectorContext`].
///
/// # Example
///
/// ```
/// use quiver_core::{DType, testing::mixed_batch};
/// use quiver_selectors::SelectorNamespace;
///
/// let cs = SelectorNamespace::default();
/// let batch = mixed_batch();
///
/// let selected = (cs.numeric() - cs.by_dtype([DType::Int64]))
///     .select_names(&batch)
///     .unwrap();
/// assert_eq!(selected, vec!["c"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorNamespace {
    context: SelectorContext,
}

impl SelectorNamespace {
    /// Create a namespace for the given context.
    pub const fn new(context: SelectorContext) -> Self {
        Self { context }
    }

    /// Create a namespace from configuration.
    pub fn from_config(config: &QuiverConfig) -> Self {
        Self::new(SelectorContext::from_config(config))
    }

    /// Context every selector of this namespace is built with.
    pub const fn context(&self) -> SelectorContext {
        self.context
    }

    /// Columns whose dtype is in `dtypes`.
    pub fn by_dtype<I, M>(&self, dtypes: I) -> Selector
    where
        I: IntoIterator<Item = M>,
        M: Into<DTypeMatcher>,
    {
        let dtypes: DTypeSet = dtypes.into_iter().collect();
        Selector::from_node(SelectorNode::ByDtype(dtypes), self.context)
    }

    /// Integer and float columns.
    pub fn numeric(&self) -> Selector {
        self.by_dtype(NUMERIC_DTYPES)
    }

    /// Categorical columns.
    pub fn categorical(&self) -> Selector {
        self.by_dtype([DType::Categorical])
    }

    /// String columns.
    pub fn string(&self) -> Selector {
        self.by_dtype([DType::String])
    }

    /// Boolean columns.
    pub fn boolean(&self) -> Selector {
        self.by_dtype([DType::Boolean])
    }

    /// Every column.
    pub fn all(&self) -> Selector {
        Selector::from_node(SelectorNode::All, self.context)
    }

    /// Datetime columns matching the given units and zones.
    ///
    /// `TimeUnitSpec::Any` matches every unit. `TimeZoneSpec::Any` matches
    /// any set zone as well as naive timestamps. Unknown units or zones fail
    /// with `InvalidParameter`.
    pub fn datetime(
        &self,
        time_unit: impl Into<TimeUnitSpec>,
        time_zone: impl Into<TimeZoneSpec>,
    ) -> QuiverResult<Selector> {
        let dtypes =
            resolve_datetime_selector(&time_unit.into(), &time_zone.into(), self.context.version)?;
        Ok(self.by_dtype(dtypes))
    }
}
