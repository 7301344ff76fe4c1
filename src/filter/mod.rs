//! The Filter Context: an immutable, validated snapshot of the user's filter
//! selection.
//!
//! Raw values coming from the UI are corrected here rather than rejected, so
//! the metric layer never sees a non-positive top-N or an inverted range.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::Category;

/// Top-N used when none (or an invalid one) is supplied.
pub const DEFAULT_TOP_N: usize = 10;

/// Selection entry meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Lowest and highest review scores.
pub const MIN_REVIEW_SCORE: u8 = 1;
pub const MAX_REVIEW_SCORE: u8 = 5;

/// Raw filter values as the UI hands them over.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub top_n: i64,
    pub categories: Vec<String>,
    /// Inclusive shipping-time bounds in days. `None` means unbounded.
    pub shipping_time: Option<(f64, f64)>,
    /// Inclusive review-score bounds. `None` means 1..=5.
    pub review_score: Option<(i64, i64)>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N as i64,
            categories: vec![ALL_CATEGORIES.to_string()],
            shipping_time: None,
            review_score: None,
        }
    }
}

impl FilterParams {
    pub fn with_top_n(mut self, top_n: i64) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shipping_time(mut self, min: f64, max: f64) -> Self {
        self.shipping_time = Some((min, max));
        self
    }

    pub fn with_review_score(mut self, min: i64, max: i64) -> Self {
        self.review_score = Some((min, max));
        self
    }
}

/// Which product categories participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    All,
    Subset(BTreeSet<Category>),
}

impl CategoryFilter {
    /// Interpret a multiselect value. An empty selection, or one containing
    /// the "All Categories" entry, is unrestricted. Blank entries are skipped.
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut subset = BTreeSet::new();
        for label in selection {
            let label = label.as_ref();
            if label == ALL_CATEGORIES {
                return CategoryFilter::All;
            }
            subset.extend(Category::from_selection(label));
        }
        if subset.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Subset(subset)
        }
    }

    pub fn allows(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Subset(subset) => subset.contains(category),
        }
    }
}

/// Inclusive shipping-time range in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShippingRange {
    min: f64,
    max: f64,
}

impl ShippingRange {
    pub const UNBOUNDED: ShippingRange = ShippingRange {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// NaN endpoints are unbounded on their side; inverted bounds are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_nan() { f64::NEG_INFINITY } else { min };
        let max = if max.is_nan() { f64::INFINITY } else { max };
        if min > max {
            debug!(min, max, "swapping inverted shipping time range");
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, days: f64) -> bool {
        days >= self.min && days <= self.max
    }
}

impl Default for ShippingRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Inclusive review-score range, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    min: u8,
    max: u8,
}

impl ScoreRange {
    pub const FULL: ScoreRange = ScoreRange {
        min: MIN_REVIEW_SCORE,
        max: MAX_REVIEW_SCORE,
    };

    /// Bounds are clamped into 1..=5, then swapped if inverted.
    pub fn new(min: i64, max: i64) -> Self {
        let clamp = |v: i64| v.clamp(MIN_REVIEW_SCORE as i64, MAX_REVIEW_SCORE as i64) as u8;
        let (min, max) = (clamp(min), clamp(max));
        if min > max {
            debug!(min, max, "swapping inverted review score range");
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Validated filter selection threaded through every metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterContext {
    top_n: usize,
    categories: CategoryFilter,
    shipping_time: ShippingRange,
    review_score: ScoreRange,
}

impl FilterContext {
    pub fn new(params: FilterParams) -> Self {
        let top_n = match usize::try_from(params.top_n) {
            Ok(n) if n > 0 => n,
            _ => {
                warn!(
                    top_n = params.top_n,
                    fallback = DEFAULT_TOP_N,
                    "top_n must be positive, using default"
                );
                DEFAULT_TOP_N
            }
        };

        Self {
            top_n,
            categories: CategoryFilter::from_selection(&params.categories),
            shipping_time: params
                .shipping_time
                .map(|(min, max)| ShippingRange::new(min, max))
                .unwrap_or_default(),
            review_score: params
                .review_score
                .map(|(min, max)| ScoreRange::new(min, max))
                .unwrap_or_default(),
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn categories(&self) -> &CategoryFilter {
        &self.categories
    }

    pub fn shipping_time(&self) -> ShippingRange {
        self.shipping_time
    }

    pub fn review_score(&self) -> ScoreRange {
        self.review_score
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new(FilterParams::default())
    }
}

impl From<FilterParams> for FilterContext {
    fn from(params: FilterParams) -> Self {
        Self::new(params)
    }
}
