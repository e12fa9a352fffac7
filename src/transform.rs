//! Flattens a raw USGS GeoJSON response into per-event records with
//! human-readable UTC timestamps.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Full weekday and month names, 12-hour clock with microseconds, UTC.
/// Epoch 0 renders as "Thursday, January 01, 1970 12:00:00.000000 AM".
const EVENT_TIME_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S.%6f %p";

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("response has no `features` array")]
    MissingFeatures,

    #[error("feature {index} has no `properties` object")]
    MissingProperties { index: usize },

    #[error("feature {index} has malformed properties: {source}")]
    BadProperties {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature {index} has an out-of-range timestamp")]
    TimestampOutOfRange { index: usize },
}

/// The subset of event properties this service needs. `time` and
/// `updated` are required epoch-millisecond integers; everything else
/// may be null upstream and passes through as-is.
#[derive(Debug, Deserialize)]
struct RawProperties {
    mag: Option<f64>,
    place: Option<String>,
    time: i64,
    updated: i64,
    alert: Option<String>,
    status: Option<String>,
    tsunami: Option<i64>,
    #[serde(rename = "magType")]
    mag_type: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFeature {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: String,
    pub updated: String,
    pub alert: Option<String>,
    pub status: Option<String>,
    pub tsunami: i64,
    #[serde(rename = "magType")]
    pub mag_type: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub title: Option<String>,
}

pub fn transform(raw: &Value) -> Result<Vec<EventFeature>, TransformError> {
    let features = raw
        .get("features")
        .and_then(Value::as_array)
        .ok_or(TransformError::MissingFeatures)?;

    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let properties = feature
                .get("properties")
                .filter(|p| p.is_object())
                .ok_or(TransformError::MissingProperties { index })?;

            let props: RawProperties = serde_json::from_value(properties.clone())
                .map_err(|source| TransformError::BadProperties { index, source })?;

            Ok(EventFeature {
                mag: props.mag,
                place: props.place,
                time: format_event_time(props.time)
                    .ok_or(TransformError::TimestampOutOfRange { index })?,
                updated: format_event_time(props.updated)
                    .ok_or(TransformError::TimestampOutOfRange { index })?,
                alert: props.alert,
                status: props.status,
                tsunami: props.tsunami.unwrap_or(0),
                mag_type: props.mag_type,
                event_type: props.event_type,
                title: props.title,
            })
        })
        .collect()
}

fn format_event_time(epoch_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(epoch_ms).map(|dt| dt.format(EVENT_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(properties: Value) -> Value {
        json!({ "type": "FeatureCollection", "features": [{ "properties": properties }] })
    }

    #[test]
    fn formats_epoch_zero_in_utc() {
        assert_eq!(
            format_event_time(0).unwrap(),
            "Thursday, January 01, 1970 12:00:00.000000 AM"
        );
    }

    #[test]
    fn formats_afternoon_with_milliseconds() {
        // 2021-07-29 14:05:09.123 UTC
        assert_eq!(
            format_event_time(1_627_567_509_123).unwrap(),
            "Thursday, July 29, 2021 02:05:09.123000 PM"
        );
    }

    #[test]
    fn flattens_properties() {
        let raw = feature(json!({
            "mag": 5.2,
            "place": "100km SSW of somewhere",
            "time": 0,
            "updated": 1000,
            "alert": "green",
            "status": "reviewed",
            "tsunami": 1,
            "magType": "mb",
            "type": "earthquake",
            "title": "M 5.2 - 100km SSW of somewhere"
        }));

        let events = transform(&raw).unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.mag, Some(5.2));
        assert_eq!(event.time, "Thursday, January 01, 1970 12:00:00.000000 AM");
        assert_eq!(event.updated, "Thursday, January 01, 1970 12:00:01.000000 AM");
        assert_eq!(event.tsunami, 1);
        assert_eq!(event.mag_type.as_deref(), Some("mb"));
    }

    #[test]
    fn nullable_fields_pass_through() {
        let raw = feature(json!({
            "mag": null,
            "place": null,
            "time": 0,
            "updated": 0,
            "alert": null
        }));

        let events = transform(&raw).unwrap();
        assert_eq!(events[0].mag, None);
        assert_eq!(events[0].alert, None);
        assert_eq!(events[0].tsunami, 0);
    }

    #[test]
    fn rejects_missing_features() {
        let err = transform(&json!({ "metadata": {} })).unwrap_err();
        assert!(matches!(err, TransformError::MissingFeatures));
    }

    #[test]
    fn rejects_feature_without_properties() {
        let raw = json!({ "features": [{ "geometry": null }] });
        let err = transform(&raw).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingProperties { index: 0 }
        ));
    }

    #[test]
    fn rejects_properties_without_time() {
        let raw = feature(json!({ "mag": 4.0, "updated": 0 }));
        let err = transform(&raw).unwrap_err();
        assert!(matches!(err, TransformError::BadProperties { index: 0, .. }));
    }

    #[test]
    fn empty_features_is_empty_output() {
        let raw = json!({ "features": [] });
        assert!(transform(&raw).unwrap().is_empty());
    }
}
