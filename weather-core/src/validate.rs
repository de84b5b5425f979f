use crate::{error::LookupError, model::WeatherQuery};

/// Turn the raw `city` query parameter into a [`WeatherQuery`].
///
/// Only presence is checked; case and punctuation pass through untouched.
pub fn validate(raw_city: Option<&str>) -> Result<WeatherQuery, LookupError> {
    let city = raw_city.map(str::trim).unwrap_or_default();

    if city.is_empty() {
        return Err(LookupError::MissingCity);
    }

    Ok(WeatherQuery::new(city.to_string()))
}
