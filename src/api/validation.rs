use chrono::NaiveDate;

use super::ApiError;

pub const MIN_MAGNITUDE: f64 = 1.0;
pub const MAX_MAGNITUDE: f64 = 12.0;

/// The provider's catalog is only searched from this date onwards.
fn earliest_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).expect("2010-01-01 is a valid date")
}

/// Date-mode rules, evaluated in order; the first failure aborts.
pub fn validate_date_search(
    start: NaiveDate,
    end: NaiveDate,
    min_magnitude: f64,
    today: NaiveDate,
) -> Result<(), ApiError> {
    if !(MIN_MAGNITUDE..=MAX_MAGNITUDE).contains(&min_magnitude) {
        return Err(ApiError::validation(
            "magnitudeMinima must be greater or equal to 1 and less or equal to 12",
        ));
    }

    if start > end {
        return Err(ApiError::validation(
            "fechaInicio must be before or equal to fechaFin",
        ));
    }

    if end > today {
        return Err(ApiError::validation(
            "fechaFin must be before or equal to today",
        ));
    }

    if start < earliest_start_date() {
        return Err(ApiError::validation(
            "fechaInicio must be after or equal to 2010-01-01",
        ));
    }

    Ok(())
}

/// Magnitude-mode rules, evaluated in order; the first failure aborts.
pub fn validate_magnitude_search(min_magnitude: f64, max_magnitude: f64) -> Result<(), ApiError> {
    if min_magnitude < MIN_MAGNITUDE || min_magnitude > max_magnitude {
        return Err(ApiError::validation(
            "magnitudeMinima must be greater or equal to 1 and less or equal to magnitudeMaxima",
        ));
    }

    if max_magnitude > MAX_MAGNITUDE {
        return Err(ApiError::validation(
            "magnitudeMaxima must be less or equal to 12",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn valid_date_search_passes() {
        assert!(validate_date_search(date(2020, 1, 1), date(2020, 6, 1), 5.0, today()).is_ok());
        assert!(validate_date_search(date(2010, 1, 1), today(), 1.0, today()).is_ok());
        assert!(
            validate_date_search(date(2015, 3, 3), date(2015, 3, 3), 12.0, today()).is_ok()
        );
    }

    #[test]
    fn magnitude_below_one_fails_regardless_of_dates() {
        let err =
            validate_date_search(date(2020, 1, 1), date(2020, 6, 1), 0.5, today()).unwrap_err();
        assert!(err.to_string().contains("magnitudeMinima"));

        // Dates are inverted too, but the magnitude rule fires first
        let err =
            validate_date_search(date(2020, 6, 1), date(2020, 1, 1), 0.5, today()).unwrap_err();
        assert!(err.to_string().contains("magnitudeMinima"));
    }

    #[test]
    fn inverted_date_range_fails_with_ordering_message() {
        let err =
            validate_date_search(date(2020, 6, 1), date(2020, 1, 1), 5.0, today()).unwrap_err();
        assert!(err.to_string().contains("fechaInicio"));
        assert!(err.to_string().contains("fechaFin"));
    }

    #[test]
    fn end_date_in_the_future_fails() {
        let err =
            validate_date_search(date(2024, 1, 1), date(2024, 12, 31), 5.0, today()).unwrap_err();
        assert!(err.to_string().contains("today"));
    }

    #[test]
    fn start_date_before_catalog_floor_fails() {
        let err =
            validate_date_search(date(2009, 12, 31), date(2020, 1, 1), 5.0, today()).unwrap_err();
        assert!(err.to_string().contains("2010-01-01"));
    }

    #[test]
    fn valid_magnitude_search_passes() {
        assert!(validate_magnitude_search(1.0, 12.0).is_ok());
        assert!(validate_magnitude_search(4.5, 4.5).is_ok());
    }

    #[test]
    fn min_above_max_fails() {
        let err = validate_magnitude_search(5.0, 3.0).unwrap_err();
        assert!(err.to_string().contains("magnitudeMinima"));
    }

    #[test]
    fn max_above_twelve_fails() {
        let err = validate_magnitude_search(2.0, 12.5).unwrap_err();
        assert!(err.to_string().contains("magnitudeMaxima"));
    }
}
