use crate::core::summary;
use crate::domain::model::{EstimateRequest, EstimateResult, FeatureSizes};
use crate::domain::ports::Predictor;
use crate::utils::error::{EstimatorError, Result};
use chrono::{NaiveDateTime, TimeDelta};

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: i64 = 24;

/// Runs a cost and a turnaround predictor over one request and assembles the
/// result. Holds no state between calls.
pub struct EstimationEngine<C: Predictor, T: Predictor> {
    cost: C,
    turnaround: T,
}

impl<C: Predictor, T: Predictor> EstimationEngine<C, T> {
    pub fn new(cost: C, turnaround: T) -> Self {
        Self { cost, turnaround }
    }

    pub fn cost_predictor(&self) -> &C {
        &self.cost
    }

    pub fn turnaround_predictor(&self) -> &T {
        &self.turnaround
    }

    /// Either both predictions succeed and a full result is returned, or the
    /// call fails with `EstimationFailure`.
    pub fn estimate(&self, request: &EstimateRequest) -> Result<EstimateResult> {
        let features = &request.features;
        tracing::debug!(
            "Estimating F0={} F1={} F2={} item={:?}",
            features.f0,
            features.f1,
            features.f2,
            request.item_id
        );

        let cost_hours = self.run_predictor(&self.cost, features)?;
        let turnaround_hours = self.run_predictor(&self.turnaround, features)?;

        let delivery_date = delivery_date(request.created, turnaround_hours)?;
        let turnaround_days = turnaround_days(turnaround_hours);
        let cost_hours = cost_hours as i64;

        let summary_text = summary::render(
            request.item_id.as_deref(),
            request.created,
            turnaround_days,
            delivery_date,
            cost_hours,
        );

        tracing::info!(
            "Estimated {} mhrs, {} days turnaround, FG on {}",
            cost_hours,
            turnaround_days,
            delivery_date.format(summary::DATE_FORMAT)
        );

        Ok(EstimateResult {
            cost_hours,
            turnaround_hours,
            turnaround_days,
            delivery_date,
            title: summary::TITLE.to_string(),
            summary_text,
        })
    }

    /// Positional form of [`estimate`](Self::estimate); `created` defaults to now.
    pub fn estimate_features(
        &self,
        f0: u64,
        f1: u64,
        f2: u64,
        created: Option<NaiveDateTime>,
    ) -> Result<EstimateResult> {
        let mut request = EstimateRequest::new(FeatureSizes::new(f0, f1, f2));
        if let Some(created) = created {
            request = request.with_created(created);
        }
        self.estimate(&request)
    }

    fn run_predictor<P: Predictor>(&self, predictor: &P, features: &FeatureSizes) -> Result<f64> {
        let hours = predictor.predict(features).map_err(|e| {
            tracing::debug!("Predictor '{}' failed: {}", predictor.name(), e);
            EstimatorError::estimation_failure(format!("{} predictor failed", predictor.name()))
        })?;

        if !hours.is_finite() {
            tracing::debug!("Predictor '{}' returned {}", predictor.name(), hours);
            return Err(EstimatorError::estimation_failure(format!(
                "{} predictor returned a non-finite value",
                predictor.name()
            )));
        }

        Ok(hours)
    }
}

/// Whole days, truncating the hour value first and then dividing by 24.
pub fn turnaround_days(turnaround_hours: f64) -> i64 {
    (turnaround_hours as i64) / HOURS_PER_DAY
}

/// `created` plus `turnaround_hours * 3600` seconds, at millisecond resolution.
pub fn delivery_date(created: NaiveDateTime, turnaround_hours: f64) -> Result<NaiveDateTime> {
    let millis = (turnaround_hours * SECONDS_PER_HOUR * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(EstimatorError::estimation_failure(
            "turnaround is outside the representable range",
        ));
    }

    TimeDelta::try_milliseconds(millis as i64)
        .and_then(|offset| created.checked_add_signed(offset))
        .ok_or_else(|| {
            EstimatorError::estimation_failure("delivery date is outside the calendar range")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FnPredictor;
    use chrono::NaiveDate;

    fn at_midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn constant(name: &str, hours: f64) -> FnPredictor<impl Fn(&FeatureSizes) -> Result<f64>> {
        FnPredictor::new(name, move |_: &FeatureSizes| Ok(hours))
    }

    #[test]
    fn test_reference_scenario() {
        let engine = EstimationEngine::new(constant("cost", 120.0), constant("turnaround", 240.0));
        let request = EstimateRequest::new(FeatureSizes::new(501, 500, 500))
            .with_created(at_midnight(2024, 1, 2));

        let result = engine.estimate(&request).unwrap();

        assert_eq!(result.cost_hours, 120);
        assert_eq!(result.turnaround_days, 10);
        assert_eq!(result.delivery_date, at_midnight(2024, 1, 12));
        assert!(result.summary_text.contains("120"));
        assert!(result.summary_text.contains("10"));
    }

    #[test]
    fn test_turnaround_days_truncates() {
        assert_eq!(turnaround_days(0.0), 0);
        assert_eq!(turnaround_days(23.99), 0);
        assert_eq!(turnaround_days(24.0), 1);
        assert_eq!(turnaround_days(47.5), 1);
        assert_eq!(turnaround_days(240.0), 10);
    }

    #[test]
    fn test_delivery_date_adds_hours_as_seconds() {
        let created = at_midnight(2024, 1, 2);
        assert_eq!(delivery_date(created, 0.0).unwrap(), created);
        assert_eq!(
            delivery_date(created, 1.5).unwrap(),
            created + TimeDelta::seconds(5400)
        );
        assert_eq!(
            delivery_date(created, 36.0).unwrap(),
            created + TimeDelta::seconds(36 * 3600)
        );
    }

    #[test]
    fn test_delivery_date_out_of_range() {
        let created = at_midnight(2024, 1, 2);
        assert!(delivery_date(created, 1e300).is_err());
    }

    #[test]
    fn test_cost_truncates_toward_zero() {
        let engine = EstimationEngine::new(constant("cost", 99.9), constant("turnaround", 1.0));
        let result = engine
            .estimate_features(1, 2, 3, Some(at_midnight(2024, 1, 2)))
            .unwrap();
        assert_eq!(result.cost_hours, 99);
    }

    #[test]
    fn test_non_finite_prediction_is_failure() {
        let engine = EstimationEngine::new(constant("cost", f64::NAN), constant("turnaround", 1.0));
        let err = engine.estimate_features(0, 0, 0, None).unwrap_err();
        assert!(matches!(err, EstimatorError::EstimationFailure { .. }));
    }

    #[test]
    fn test_zero_inputs_accepted() {
        let engine = EstimationEngine::new(constant("cost", 0.0), constant("turnaround", 0.0));
        let result = engine
            .estimate_features(0, 0, 0, Some(at_midnight(2024, 1, 2)))
            .unwrap();
        assert_eq!(result.cost_hours, 0);
        assert_eq!(result.turnaround_days, 0);
        assert_eq!(result.delivery_date, at_midnight(2024, 1, 2));
    }
}
