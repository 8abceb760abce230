//! Temperatures — a scale tag that always travels with its value, and the
//! two roles a temperature can play.
//!
//! [`Setpoint`] and [`Reading`] share a layout but are distinct types, so a
//! measured value can never be passed where a target is expected:
//!
//! ```compile_fail
//! use thermostat_domain::temperature::{Reading, Setpoint, TemperatureUnit};
//!
//! fn heat_towards(target: Setpoint) -> Setpoint {
//!     target
//! }
//!
//! let inside = Reading::new(TemperatureUnit::Celsius(19));
//! heat_towards(inside);
//! ```
//!
//! Nor is there a conversion between the two roles:
//!
//! ```compile_fail
//! use thermostat_domain::temperature::{Reading, Setpoint, TemperatureUnit};
//!
//! let target = Setpoint::new(TemperatureUnit::Celsius(21));
//! let _: Reading = target.into();
//! ```

use serde::{Deserialize, Serialize};

/// Temperature scale, without a value.
///
/// Names a conversion target or a display preference. A temperature is
/// always a [`TemperatureUnit`], never a bare number plus a `Scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Celsius,
    Fahrenheit,
}

impl Scale {
    /// Unit suffix, e.g. `°C`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "\u{b0}C",
            Self::Fahrenheit => "\u{b0}F",
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Celsius => f.write_str("celsius"),
            Self::Fahrenheit => f.write_str("fahrenheit"),
        }
    }
}

/// A whole-degree temperature tagged with its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scale", content = "value", rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius(i32),
    Fahrenheit(i32),
}

impl TemperatureUnit {
    /// Build a value on the given scale.
    #[must_use]
    pub fn new(scale: Scale, value: i32) -> Self {
        match scale {
            Scale::Celsius => Self::Celsius(value),
            Scale::Fahrenheit => Self::Fahrenheit(value),
        }
    }

    #[must_use]
    pub fn scale(self) -> Scale {
        match self {
            Self::Celsius(_) => Scale::Celsius,
            Self::Fahrenheit(_) => Scale::Fahrenheit,
        }
    }

    /// Degrees on [`scale`](Self::scale). Meaningless on its own.
    #[must_use]
    pub fn value(self) -> i32 {
        match self {
            Self::Celsius(value) | Self::Fahrenheit(value) => value,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value(), self.scale().symbol())
    }
}

/// Target temperature the thermostat drives toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Setpoint(TemperatureUnit);

impl Setpoint {
    #[must_use]
    pub fn new(unit: TemperatureUnit) -> Self {
        Self(unit)
    }

    #[must_use]
    pub fn unit(self) -> TemperatureUnit {
        self.0
    }

    /// The same target expressed on another scale.
    #[must_use]
    pub fn converted_to(self, scale: Scale) -> Self {
        Self(crate::conversion::convert(self.0, scale))
    }
}

impl std::fmt::Display for Setpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Temperature as measured by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(TemperatureUnit);

impl Reading {
    #[must_use]
    pub fn new(unit: TemperatureUnit) -> Self {
        Self(unit)
    }

    #[must_use]
    pub fn unit(self) -> TemperatureUnit {
        self.0
    }

    /// The same measurement expressed on another scale.
    #[must_use]
    pub fn converted_to(self, scale: Scale) -> Self {
        Self(crate::conversion::convert(self.0, scale))
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
