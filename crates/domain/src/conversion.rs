//! Scale conversion between Celsius and Fahrenheit.
//!
//! Conversion lives outside the value types: a [`TemperatureUnit`] never
//! changes scale on its own, callers ask for it explicitly.

use crate::temperature::{Scale, TemperatureUnit};

/// Express `unit` on the `target` scale.
///
/// Results are rounded to the nearest whole degree (halves away from zero)
/// and saturate at the bounds of `i32`. Converting to the scale a value is
/// already on returns it unchanged.
///
/// ```
/// use thermostat_domain::conversion::convert;
/// use thermostat_domain::temperature::{Scale, TemperatureUnit};
///
/// assert_eq!(
///     convert(TemperatureUnit::Celsius(25), Scale::Fahrenheit),
///     TemperatureUnit::Fahrenheit(77)
/// );
/// ```
#[must_use]
pub fn convert(unit: TemperatureUnit, target: Scale) -> TemperatureUnit {
    match (unit, target) {
        (TemperatureUnit::Celsius(_), Scale::Celsius)
        | (TemperatureUnit::Fahrenheit(_), Scale::Fahrenheit) => unit,
        (TemperatureUnit::Celsius(c), Scale::Fahrenheit) => {
            TemperatureUnit::Fahrenheit(saturate(div_round(i64::from(c) * 9, 5) + 32))
        }
        (TemperatureUnit::Fahrenheit(f), Scale::Celsius) => {
            TemperatureUnit::Celsius(saturate(div_round((i64::from(f) - 32) * 5, 9)))
        }
    }
}

// Odd divisors only, so an exact half never occurs.
fn div_round(numerator: i64, divisor: i64) -> i64 {
    let half = divisor / 2;
    if numerator >= 0 {
        (numerator + half) / divisor
    } else {
        (numerator - half) / divisor
    }
}

fn saturate(value: i64) -> i32 {
    match i32::try_from(value) {
        Ok(value) => value,
        Err(_) if value < 0 => i32::MIN,
        Err(_) => i32::MAX,
    }
}
