use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The three feature-size buckets, in man-hours, fed to every predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeatureSizes {
    pub f0: u64,
    pub f1: u64,
    pub f2: u64,
}

impl FeatureSizes {
    pub fn new(f0: u64, f1: u64, f2: u64) -> Self {
        Self { f0, f1, f2 }
    }

    pub fn as_array(&self) -> [u64; 3] {
        [self.f0, self.f1, self.f2]
    }
}

/// One estimation request. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub features: FeatureSizes,
    pub item_id: Option<String>,
    pub created: NaiveDateTime,
}

impl EstimateRequest {
    /// Creation date defaults to the current local time.
    pub fn new(features: FeatureSizes) -> Self {
        Self {
            features,
            item_id: None,
            created: Local::now().naive_local(),
        }
    }

    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = created;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub cost_hours: i64,
    pub turnaround_hours: f64,
    pub turnaround_days: i64,
    pub delivery_date: NaiveDateTime,
    pub title: String,
    pub summary_text: String,
}
