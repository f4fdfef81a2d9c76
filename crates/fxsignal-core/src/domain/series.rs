use serde::{Deserialize, Serialize};

use crate::percentile::percentile;

/// Daily rates for one currency pair, oldest first.
///
/// Days the provider did not publish (weekends, holidays) are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSeries(Vec<f64>);

impl RateSeries {
    pub fn new(rates: Vec<f64>) -> Self {
        Self(rates)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Linear-interpolated percentile, `None` for an empty series.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        percentile(&self.0, p)
    }
}

impl From<Vec<f64>> for RateSeries {
    fn from(value: Vec<f64>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<f64> for RateSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
