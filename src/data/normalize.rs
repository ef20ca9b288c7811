//! Provider payload normalization
//!
//! Turns raw OpenWeatherMap responses into the `WeatherData` view model. Two
//! incompatible response shapes exist — the free-tier current+forecast pair
//! and the combined one-call document — so the input is a tagged union
//! dispatched to one combiner per shape, both producing the same output type.
//!
//! Everything here is pure arithmetic and date bookkeeping: no I/O, no
//! failure paths. Missing optional fields take fixed defaults, conversions
//! use fixed constants, and all rounding is round-half-away-from-zero.

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

use super::openweather::{
    CurrentResponse, ForecastResponse, OneCallCurrent, OneCallDaily, OneCallResponse, WeatherEntry,
};
use super::{
    CurrentConditions, DailyEntry, HourlyEntry, WeatherAlert, WeatherCondition, WeatherData,
};

/// Hourly entries kept when the source delivers 3-hour forecast steps
pub const SPLIT_HOURLY_CAP: usize = 16;
/// Hourly entries kept when the source delivers true per-hour data
pub const ONE_CALL_HOURLY_CAP: usize = 48;
/// Daily entries derived from the 3-hour forecast
pub const SPLIT_DAILY_CAP: usize = 5;
/// Daily entries kept from the one-call native daily data
pub const ONE_CALL_DAILY_CAP: usize = 8;

/// Wind speed conversion factor, m/s to km/h
const MS_TO_KMH: f64 = 3.6;
/// Visibility conversion factor, m to km
const M_PER_KM: f64 = 1000.0;
/// Visibility assumed when the provider omits the field, in meters
const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// Raw provider input, tagged by API shape
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    /// Free-tier pair: current weather plus the 3-hour step forecast
    Split {
        current: CurrentResponse,
        forecast: ForecastResponse,
    },
    /// Single combined current/hourly/daily response
    OneCall(Box<OneCallResponse>),
}

/// A forecast sample reduced to the fields the hourly/daily reducers need
#[derive(Debug, Clone)]
pub struct ForecastSample {
    /// Unix timestamp of the sample
    pub dt: i64,
    /// Temperature in Celsius
    pub temp: f64,
    /// Probability of precipitation, a fraction in [0, 1]
    pub pop: f64,
    /// Wind speed in m/s
    pub wind_ms: f64,
    /// Condition group
    pub condition: WeatherCondition,
}

/// Builds the normalized view model from a raw provider payload
pub fn build(payload: ProviderPayload) -> WeatherData {
    match payload {
        ProviderPayload::Split { current, forecast } => combine_split(&current, &forecast),
        ProviderPayload::OneCall(one_call) => combine_one_call(&one_call),
    }
}

/// Combines the free-tier current+forecast pair into `WeatherData`
///
/// The 3-hour forecast has no native daily data, so the daily list is
/// derived by grouping the forecast samples by calendar date.
fn combine_split(current: &CurrentResponse, forecast: &ForecastResponse) -> WeatherData {
    let timezone_offset = forecast.city.as_ref().map(|c| c.timezone).unwrap_or(0);

    let samples: Vec<ForecastSample> = forecast
        .list
        .iter()
        .map(|entry| ForecastSample {
            dt: entry.dt,
            temp: entry.main.temp,
            pop: entry.pop.unwrap_or(0.0),
            wind_ms: entry.wind.speed,
            condition: condition_of(&entry.weather),
        })
        .collect();

    WeatherData {
        current: normalize_split_current(current),
        hourly: normalize_hourly(&samples, SPLIT_HOURLY_CAP, timezone_offset),
        daily: derive_daily(&samples, SPLIT_DAILY_CAP),
        timezone_offset,
        alerts: Vec::new(),
    }
}

/// Combines a one-call response into `WeatherData`
fn combine_one_call(raw: &OneCallResponse) -> WeatherData {
    let samples: Vec<ForecastSample> = raw
        .hourly
        .iter()
        .map(|entry| ForecastSample {
            dt: entry.dt,
            temp: entry.temp,
            pop: entry.pop,
            wind_ms: entry.wind_speed,
            condition: condition_of(&entry.weather),
        })
        .collect();

    let alerts = raw
        .alerts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|alert| WeatherAlert {
            sender: alert.sender_name.clone(),
            event: alert.event.clone(),
            start: alert.start,
            end: alert.end,
            description: alert.description.clone(),
        })
        .collect();

    WeatherData {
        current: normalize_one_call_current(&raw.current),
        hourly: normalize_hourly(&samples, ONE_CALL_HOURLY_CAP, raw.timezone_offset),
        daily: map_one_call_daily(&raw.daily, ONE_CALL_DAILY_CAP),
        timezone_offset: raw.timezone_offset,
        alerts,
    }
}

/// Normalizes the free-tier current weather reading
///
/// UV index and dew point are not available on this tier and default to 0.
fn normalize_split_current(raw: &CurrentResponse) -> CurrentConditions {
    CurrentConditions {
        temp: round_i32(raw.main.temp),
        feels_like: round_i32(raw.main.feels_like),
        condition: condition_of(&raw.weather),
        description: description_of(&raw.weather),
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_kph: round_i32(raw.wind.speed * MS_TO_KMH),
        visibility_km: visibility_km(raw.visibility),
        uv_index: 0,
        dew_point: 0,
        clouds: raw.clouds.as_ref().map(|c| c.all).unwrap_or(0),
        sunrise: raw.sys.sunrise,
        sunset: raw.sys.sunset,
    }
}

/// Normalizes the one-call current block, which carries UV and dew point
fn normalize_one_call_current(raw: &OneCallCurrent) -> CurrentConditions {
    CurrentConditions {
        temp: round_i32(raw.temp),
        feels_like: round_i32(raw.feels_like),
        condition: condition_of(&raw.weather),
        description: description_of(&raw.weather),
        humidity: raw.humidity,
        pressure: raw.pressure,
        wind_kph: round_i32(raw.wind_speed * MS_TO_KMH),
        visibility_km: visibility_km(raw.visibility),
        uv_index: round_i32(raw.uvi),
        dew_point: round_i32(raw.dew_point),
        clouds: raw.clouds,
        sunrise: raw.sunrise.unwrap_or(0),
        sunset: raw.sunset.unwrap_or(0),
    }
}

/// Produces the hourly strip from forecast samples
///
/// Samples are taken in provider order (assumed chronological ascending) and
/// truncated to `cap`; 3-hour steps surface as-is with no interpolation. The
/// display label is the sample's wall-clock hour at the location, computed by
/// shifting the timestamp by the location's UTC offset and reading the hour
/// in the zero-offset representation, so the label does not depend on the
/// host timezone.
pub fn normalize_hourly(
    samples: &[ForecastSample],
    cap: usize,
    timezone_offset: i32,
) -> Vec<HourlyEntry> {
    samples
        .iter()
        .take(cap)
        .enumerate()
        .map(|(index, sample)| HourlyEntry {
            timestamp: sample.dt,
            label: hour_label(sample.dt, timezone_offset),
            temp: round_i32(sample.temp),
            condition: sample.condition,
            rain: pop_percent(sample.pop),
            wind_kph: round_i32(sample.wind_ms * MS_TO_KMH),
            is_current: index == 0,
        })
        .collect()
}

/// Derives daily entries by grouping forecast samples per calendar date
///
/// Grouping uses the host-local date of each sample. Groups are emitted in
/// first-seen order and truncated to `cap`; a partial final day is emitted
/// with whatever samples it has. Within a group the temperature range is the
/// min/max over the samples, rain is the maximum probability of
/// precipitation, and the condition is the most frequent group with ties
/// resolved in favor of the first one encountered.
pub fn derive_daily(samples: &[ForecastSample], cap: usize) -> Vec<DailyEntry> {
    struct DayBucket {
        dt: i64,
        date: NaiveDate,
        temps: Vec<f64>,
        conditions: Vec<WeatherCondition>,
        max_pop: f64,
    }

    let mut buckets: Vec<DayBucket> = Vec::new();
    for sample in samples {
        let date = local_date(sample.dt);
        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => {
                bucket.temps.push(sample.temp);
                bucket.conditions.push(sample.condition);
                bucket.max_pop = bucket.max_pop.max(sample.pop);
            }
            None => buckets.push(DayBucket {
                dt: sample.dt,
                date,
                temps: vec![sample.temp],
                conditions: vec![sample.condition],
                max_pop: sample.pop,
            }),
        }
    }

    buckets.truncate(cap);
    buckets
        .into_iter()
        .map(|bucket| {
            let (min, max) = bucket
                .temps
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                    (lo.min(t), hi.max(t))
                });
            DailyEntry {
                timestamp: bucket.dt,
                temp_min: round_i32(min),
                temp_max: round_i32(max),
                condition: modal_condition(&bucket.conditions),
                rain: pop_percent(bucket.max_pop),
                summary: None,
            }
        })
        .collect()
}

/// Maps the one-call native daily blocks, truncated to `cap`
fn map_one_call_daily(days: &[OneCallDaily], cap: usize) -> Vec<DailyEntry> {
    days.iter()
        .take(cap)
        .map(|day| DailyEntry {
            timestamp: day.dt,
            temp_min: round_i32(day.temp.min),
            temp_max: round_i32(day.temp.max),
            condition: condition_of(&day.weather),
            rain: pop_percent(day.pop),
            summary: day.summary.clone(),
        })
        .collect()
}

/// Rounded mean temperature of the hourly slots `[start, start+count)`
///
/// The range is clipped to the available length. An empty resulting range
/// (start beyond the end) yields the defined sentinel `0`, not an error.
pub fn average_temperature(hourly: &[HourlyEntry], start: usize, count: usize) -> i32 {
    let end = start.saturating_add(count).min(hourly.len());
    if start >= end {
        return 0;
    }
    let slice = &hourly[start..end];
    let sum: i64 = slice.iter().map(|entry| i64::from(entry.temp)).sum();
    (sum as f64 / slice.len() as f64).round() as i32
}

/// The most frequent condition, ties resolved by first occurrence
fn modal_condition(conditions: &[WeatherCondition]) -> WeatherCondition {
    let mut counts: Vec<(WeatherCondition, usize)> = Vec::new();
    for &condition in conditions {
        match counts.iter_mut().find(|(seen, _)| *seen == condition) {
            Some((_, count)) => *count += 1,
            None => counts.push((condition, 1)),
        }
    }

    let mut best = match counts.first() {
        Some(&first) => first,
        None => return WeatherCondition::default(),
    };
    for &(condition, count) in &counts[1..] {
        if count > best.1 {
            best = (condition, count);
        }
    }
    best.0
}

/// `HH:00` label for a timestamp at the given UTC offset
fn hour_label(timestamp: i64, timezone_offset: i32) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp + i64::from(timezone_offset), 0) {
        Some(shifted) => format!("{:02}:00", shifted.hour()),
        None => "00:00".to_string(),
    }
}

/// Host-local calendar date of a Unix timestamp
fn local_date(timestamp: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&Local).date_naive())
        .unwrap_or_default()
}

/// Probability of precipitation as an integer percentage in [0, 100]
fn pop_percent(pop: f64) -> u8 {
    (pop * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Visibility in km, defaulting when the provider omits the field
fn visibility_km(meters: Option<u32>) -> i32 {
    round_i32(f64::from(meters.unwrap_or(DEFAULT_VISIBILITY_M)) / M_PER_KM)
}

/// Condition group of the first weather entry, `Clouds` when absent
fn condition_of(weather: &[WeatherEntry]) -> WeatherCondition {
    weather
        .first()
        .map(|entry| WeatherCondition::from_group(&entry.main))
        .unwrap_or_default()
}

/// Description of the first weather entry, empty when absent
fn description_of(weather: &[WeatherEntry]) -> String {
    weather
        .first()
        .map(|entry| entry.description.clone())
        .unwrap_or_default()
}

/// Round-half-away-from-zero to the nearest integer
fn round_i32(value: f64) -> i32 {
    value.round() as i32
}
