//! Spending forecaster
//!
//! Fits an ordinary least-squares line through a user's daily expense totals
//! and extrapolates it over the coming days:
//! - expenses are summed per calendar date
//! - each date becomes a day ordinal (day 1 = 0001-01-01)
//! - the line is refit from scratch on every call; nothing is cached
//! - predictions are rounded to cents and never go below zero
//!
//! With a single distinct date the slope is undefined, so the fit falls back to
//! a flat line through that day's total.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, ForecastPoint};

/// Forecast horizon used when the caller does not ask for one
pub const DEFAULT_FORECAST_DAYS: u32 = 30;

/// Day ordinal used as the regression feature
pub fn day_ordinal(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// Sum amounts per calendar date, ascending by date
pub fn aggregate_daily(records: &[ExpenseRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut daily = BTreeMap::new();
    for record in records {
        *daily.entry(record.date).or_insert(0.0) += record.amount;
    }
    daily
}

/// `amount = intercept + slope * ordinal`, stored centred on the mean ordinal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    mean_x: f64,
    mean_y: f64,
    slope: f64,
}

impl LinearTrend {
    /// Least-squares fit over (ordinal, amount) pairs
    ///
    /// Returns `None` for an empty input. A zero x-variance (one distinct
    /// ordinal) gives a zero slope through the mean.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in points {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

        Some(Self {
            mean_x,
            mean_y,
            slope,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.mean_y - self.slope * self.mean_x
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.mean_y + self.slope * (x - self.mean_x)
    }
}

/// Forecasts daily spending from expense history
#[derive(Clone)]
pub struct SpendingForecaster {
    clock: Arc<dyn Clock>,
}

impl SpendingForecaster {
    /// Forecaster anchored to wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Predict spending for each of the `days` days starting tomorrow
    ///
    /// An empty history yields an empty sequence. `days == 0` is rejected
    /// before the history is looked at.
    pub fn forecast(&self, records: &[ExpenseRecord], days: u32) -> Result<ForecastPoints> {
        if days == 0 {
            return Err(Error::InvalidData(
                "Forecast days must be at least 1".to_string(),
            ));
        }

        let start = self.clock.today() + Duration::days(1);

        let daily = aggregate_daily(records);
        let points: Vec<(f64, f64)> = daily
            .iter()
            .map(|(date, amount)| (day_ordinal(*date) as f64, *amount))
            .collect();

        let Some(trend) = LinearTrend::fit(&points) else {
            debug!("No expense history, nothing to forecast");
            return Ok(ForecastPoints::empty(start));
        };

        debug!(
            history_days = daily.len(),
            slope = trend.slope(),
            intercept = trend.intercept(),
            days,
            "Fitted spending trend"
        );

        Ok(ForecastPoints {
            trend: Some(trend),
            history_days: daily.len(),
            next: start,
            remaining: days,
        })
    }
}

impl Default for SpendingForecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily evaluated forecast, one point per day in ascending date order
#[derive(Debug, Clone)]
pub struct ForecastPoints {
    trend: Option<LinearTrend>,
    history_days: usize,
    next: NaiveDate,
    remaining: u32,
}

impl ForecastPoints {
    fn empty(start: NaiveDate) -> Self {
        Self {
            trend: None,
            history_days: 0,
            next: start,
            remaining: 0,
        }
    }

    /// The fitted line, if there was any history
    pub fn trend(&self) -> Option<&LinearTrend> {
        self.trend.as_ref()
    }

    /// Distinct dates of expense history the trend was fitted on
    pub fn history_days(&self) -> usize {
        self.history_days
    }
}

impl Iterator for ForecastPoints {
    type Item = ForecastPoint;

    fn next(&mut self) -> Option<ForecastPoint> {
        if self.remaining == 0 {
            return None;
        }
        let trend = self.trend.as_ref()?;

        let date = self.next;
        let raw = trend.predict(day_ordinal(date) as f64);

        self.next = date + Duration::days(1);
        self.remaining -= 1;

        Some(ForecastPoint {
            date,
            predicted_amount: round_non_negative(raw),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.trend.is_some() {
            self.remaining as usize
        } else {
            0
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for ForecastPoints {}

/// Round to cents, floor at zero (never yields -0.0)
fn round_non_negative(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}
