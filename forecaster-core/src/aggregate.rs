//! Reduces the 3-hour forecast stream into one slot per UTC calendar date.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::model::Reading;

/// Per-date aggregates, index-aligned across the four vectors.
///
/// `None` marks a slot that has not received a value yet; `Some(0.0)` is a
/// legitimate freezing reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub min_temp: Vec<Option<f64>>,
    pub max_temp: Vec<Option<f64>>,
    pub max_humidity: Vec<Option<u8>>,
}

/// One row of a [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub max_humidity: Option<u8>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// An empty series means the provider returned no forecast data.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rows of the series. Stops at the shortest vector if a hand-built
    /// series is ragged.
    pub fn days(&self) -> impl Iterator<Item = DailySummary> + '_ {
        self.dates
            .iter()
            .zip(&self.min_temp)
            .zip(&self.max_temp)
            .zip(&self.max_humidity)
            .map(|(((date, min_temp), max_temp), max_humidity)| DailySummary {
                date: *date,
                min_temp: *min_temp,
                max_temp: *max_temp,
                max_humidity: *max_humidity,
            })
    }

    /// Dates with their min and max temperature, for the temperature chart.
    pub fn temperature_series(&self) -> Vec<(NaiveDate, Option<f64>, Option<f64>)> {
        self.days().map(|d| (d.date, d.min_temp, d.max_temp)).collect()
    }

    /// Dates with their peak humidity, for the humidity chart.
    pub fn humidity_series(&self) -> Vec<(NaiveDate, Option<u8>)> {
        self.days().map(|d| (d.date, d.max_humidity)).collect()
    }

    fn push_slot(&mut self, date: NaiveDate) -> usize {
        self.dates.push(date);
        self.min_temp.push(None);
        self.max_temp.push(None);
        self.max_humidity.push(None);
        self.dates.len() - 1
    }
}

/// Build a [`DailySeries`] from readings in input order.
///
/// Dates appear in first-seen order, which is not necessarily chronological
/// if the input is not.
pub fn aggregate(readings: &[Reading]) -> DailySeries {
    let mut series = DailySeries::default();
    let mut slots: HashMap<NaiveDate, usize> = HashMap::new();

    for reading in readings {
        let date = reading.timestamp.date_naive();
        let idx = match slots.get(&date) {
            Some(idx) => *idx,
            None => {
                let idx = series.push_slot(date);
                slots.insert(date, idx);
                idx
            }
        };

        series.min_temp[idx] = lower(series.min_temp[idx], reading.temperature);
        series.max_temp[idx] = higher(series.max_temp[idx], reading.temperature);
        series.max_humidity[idx] = Some(match series.max_humidity[idx] {
            Some(current) if current >= reading.humidity => current,
            _ => reading.humidity,
        });
    }

    tracing::debug!(readings = readings.len(), days = series.len(), "aggregated forecast");
    series
}

/// `unset or value < current ? value : current`. A NaN never displaces a value.
fn lower(existing: Option<f64>, value: f64) -> Option<f64> {
    match existing {
        Some(current) if value < current => Some(value),
        Some(current) => Some(current),
        None => Some(value),
    }
}

/// `unset or value > current ? value : current`.
fn higher(existing: Option<f64>, value: f64) -> Option<f64> {
    match existing {
        Some(current) if value > current => Some(value),
        Some(current) => Some(current),
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::HashSet;

    fn reading(timestamp: DateTime<Utc>, temperature: f64, humidity: u8) -> Reading {
        Reading {
            timestamp,
            temperature,
            feels_like: temperature,
            humidity,
            cloud_coverage: 0,
            wind_speed: 0.0,
            pressure: 1013.0,
            visibility_km: Some(10.0),
            condition_code: 800,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let series = aggregate(&[]);
        assert!(series.is_empty());
        assert_eq!(series, DailySeries::default());
    }

    #[test]
    fn zero_temperature_is_recorded_as_min_and_max() {
        let series = aggregate(&[reading(at(1, 0), 0.0, 50), reading(at(1, 3), 2.5, 40)]);
        assert_eq!(series.min_temp, vec![Some(0.0)]);
        assert_eq!(series.max_temp, vec![Some(2.5)]);

        let series = aggregate(&[reading(at(1, 0), -3.0, 50), reading(at(1, 3), 0.0, 40)]);
        assert_eq!(series.max_temp, vec![Some(0.0)]);
    }

    #[test]
    fn zero_humidity_is_a_value() {
        let series = aggregate(&[reading(at(1, 0), 1.0, 0)]);
        assert_eq!(series.max_humidity, vec![Some(0)]);
    }

    #[test]
    fn readings_group_by_utc_date() {
        let series = aggregate(&[
            reading(at(1, 21), 5.0, 60),
            reading(at(2, 0), 3.0, 90),
            reading(at(2, 3), 8.0, 70),
        ]);
        assert_eq!(series.dates.len(), 2);
        assert_eq!(series.min_temp, vec![Some(5.0), Some(3.0)]);
        assert_eq!(series.max_temp, vec![Some(5.0), Some(8.0)]);
        assert_eq!(series.max_humidity, vec![Some(60), Some(90)]);
    }

    #[test]
    fn out_of_order_input_updates_its_own_slot() {
        let series = aggregate(&[
            reading(at(2, 0), 4.0, 10),
            reading(at(1, 0), 9.0, 20),
            reading(at(2, 3), -1.0, 30),
        ]);
        assert_eq!(series.dates, vec![at(2, 0).date_naive(), at(1, 0).date_naive()]);
        assert_eq!(series.min_temp, vec![Some(-1.0), Some(9.0)]);
        assert_eq!(series.max_temp, vec![Some(4.0), Some(9.0)]);
        assert_eq!(series.max_humidity, vec![Some(30), Some(20)]);
    }

    #[test]
    fn five_day_stream_matches_hand_computed_extremes() {
        let start = at(1, 0);
        let readings: Vec<Reading> = (0..40)
            .map(|i| {
                let day = i / 8;
                let slot = (i % 8) as f64;
                // day d ranges from d*2 - 4 up to d*2 + 3
                let temperature = (day as f64) * 2.0 - 4.0 + slot;
                let humidity = 50 + (day as u8) * 5 + (i % 8) as u8;
                reading(start + Duration::hours(3 * i64::from(i)), temperature, humidity)
            })
            .collect();

        let series = aggregate(&readings);

        assert_eq!(series.len(), 5);
        assert_eq!(
            series.min_temp,
            vec![Some(-4.0), Some(-2.0), Some(0.0), Some(2.0), Some(4.0)]
        );
        assert_eq!(
            series.max_temp,
            vec![Some(3.0), Some(5.0), Some(7.0), Some(9.0), Some(11.0)]
        );
        assert_eq!(
            series.max_humidity,
            vec![Some(57), Some(62), Some(67), Some(72), Some(77)]
        );
    }

    #[test]
    fn series_invariants_hold() {
        let readings: Vec<Reading> = (0..17)
            .map(|i| reading(at(1, 0) + Duration::hours(5 * i), (i * 7 % 11) as f64 - 5.0, 40))
            .collect();
        let series = aggregate(&readings);

        assert_eq!(series.dates.len(), series.min_temp.len());
        assert_eq!(series.dates.len(), series.max_temp.len());
        assert_eq!(series.dates.len(), series.max_humidity.len());

        let unique: HashSet<_> = series.dates.iter().collect();
        assert_eq!(unique.len(), series.dates.len());

        for r in &readings {
            let idx = series.dates.iter().position(|d| *d == r.timestamp.date_naive()).unwrap();
            assert!(series.min_temp[idx].unwrap() <= r.temperature);
            assert!(r.temperature <= series.max_temp[idx].unwrap());
        }
    }

    #[test]
    fn nan_reading_keeps_existing_extremes() {
        let series = aggregate(&[reading(at(1, 0), 5.0, 40), reading(at(1, 3), f64::NAN, 40)]);
        assert_eq!(series.min_temp, vec![Some(5.0)]);
        assert_eq!(series.max_temp, vec![Some(5.0)]);
    }

    #[test]
    fn days_stop_at_shortest_vector() {
        let series = DailySeries {
            dates: vec![at(1, 0).date_naive(), at(2, 0).date_naive()],
            min_temp: vec![Some(1.0)],
            max_temp: vec![Some(4.0), Some(6.0)],
            max_humidity: vec![Some(50), Some(60)],
        };
        let days: Vec<DailySummary> = series.days().collect();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].max_temp, Some(4.0));
        assert_eq!(series.humidity_series(), vec![(at(1, 0).date_naive(), Some(50))]);
    }

    #[test]
    fn projections_follow_dates() {
        let series = aggregate(&[reading(at(3, 6), 12.0, 81)]);
        let date = at(3, 6).date_naive();
        assert_eq!(series.temperature_series(), vec![(date, Some(12.0), Some(12.0))]);
        assert_eq!(series.humidity_series(), vec![(date, Some(81))]);
    }
}
