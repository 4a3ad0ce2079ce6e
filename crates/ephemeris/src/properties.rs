//! Typed property lookups and orbit construction from catalog properties.
//!
//! Catalog loaders hand orbit definitions over as a map of named values,
//! optionally tagged with a unit (`{"value": 1.5, "unit": "au"}`). This
//! module resolves those into [`units`] quantities and builds orbits from
//! them; it never parses catalog text itself.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::Vector3;
use serde::Deserialize;
use units::{Angle, J2000, KM_PER_AU, KM_PER_LIGHT_YEAR, Length, Time};

use crate::elliptical::{EllipticalOrbit, OrbitalElements};
use crate::error::EphemerisError;
use crate::fixed::FixedOrbit;
use crate::orbit::Orbit;

const KM_PER_PARSEC: f64 = 3.085_677_581_491_367e13;

/// Length units accepted in property quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Meters,
    Kilometers,
    AstronomicalUnits,
    LightYears,
    Parsecs,
}

impl LengthUnit {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "m" => Some(Self::Meters),
            "km" => Some(Self::Kilometers),
            "au" | "AU" => Some(Self::AstronomicalUnits),
            "ly" => Some(Self::LightYears),
            "pc" => Some(Self::Parsecs),
            _ => None,
        }
    }

    pub fn length(self, value: f64) -> Length {
        match self {
            Self::Meters => Length::from_meters(value),
            Self::Kilometers => Length::from_km(value),
            Self::AstronomicalUnits => Length::from_km(value * KM_PER_AU),
            Self::LightYears => Length::from_km(value * KM_PER_LIGHT_YEAR),
            Self::Parsecs => Length::from_km(value * KM_PER_PARSEC),
        }
    }
}

/// Time units accepted in property quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "s" => Some(Self::Seconds),
            "min" => Some(Self::Minutes),
            "h" => Some(Self::Hours),
            "d" => Some(Self::Days),
            "y" => Some(Self::Years),
            _ => None,
        }
    }

    pub fn time(self, value: f64) -> Time {
        match self {
            Self::Seconds => Time::from_seconds(value),
            Self::Minutes => Time::from_minutes(value),
            Self::Hours => Time::from_hours(value),
            Self::Days => Time::from_days(value),
            Self::Years => Time::from_years(value),
        }
    }
}

/// Angle units accepted in property quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
    Arcminutes,
    Arcseconds,
    Milliarcseconds,
}

impl AngleUnit {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "deg" => Some(Self::Degrees),
            "rad" => Some(Self::Radians),
            "arcmin" => Some(Self::Arcminutes),
            "arcsec" => Some(Self::Arcseconds),
            "mas" => Some(Self::Milliarcseconds),
            _ => None,
        }
    }

    pub fn angle(self, value: f64) -> Angle {
        match self {
            Self::Degrees => Angle::from_degrees(value),
            Self::Radians => Angle::from_radians(value),
            Self::Arcminutes => Angle::from_arcseconds(value * 60.0),
            Self::Arcseconds => Angle::from_arcseconds(value),
            Self::Milliarcseconds => Angle::from_arcseconds(value / 1000.0),
        }
    }
}

/// A number tagged with a unit symbol
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

/// A single catalog value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Number(f64),
    Boolean(bool),
    String(String),
    Vector([f64; 3]),
    Quantity(Quantity),
    Map(PropertyMap),
}

/// A set of named catalog values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(HashMap<String, Property>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Property) -> Option<Property> {
        self.0.insert(key.into(), value)
    }

    pub fn with(mut self, key: impl Into<String>, value: Property) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PropertySource for PropertyMap {
    fn get(&self, key: &str) -> Option<&Property> {
        self.0.get(key)
    }
}

/// Typed access to named catalog values.
///
/// Lookups return `Ok(None)` for absent keys and an error when the key is
/// present with the wrong type or an unknown unit. Unit-scaled lookups accept
/// either a bare number, read in the default unit, or a [`Quantity`].
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<&Property>;

    fn number(&self, key: &str) -> Result<Option<f64>, EphemerisError> {
        match self.get(key) {
            None => Ok(None),
            Some(Property::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
        }
    }

    fn string(&self, key: &str) -> Result<Option<&str>, EphemerisError> {
        match self.get(key) {
            None => Ok(None),
            Some(Property::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
        }
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, EphemerisError> {
        match self.get(key) {
            None => Ok(None),
            Some(Property::Boolean(value)) => Ok(Some(*value)),
            Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
        }
    }

    fn vector(&self, key: &str) -> Result<Option<Vector3<f64>>, EphemerisError> {
        match self.get(key) {
            None => Ok(None),
            Some(Property::Vector(v)) => Ok(Some(Vector3::from(*v))),
            Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
        }
    }

    fn map(&self, key: &str) -> Result<Option<&PropertyMap>, EphemerisError> {
        match self.get(key) {
            None => Ok(None),
            Some(Property::Map(map)) => Ok(Some(map)),
            Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
        }
    }

    fn length(&self, key: &str, default_unit: LengthUnit) -> Result<Option<Length>, EphemerisError> {
        scaled(self.get(key), key, |value| default_unit.length(value), |q| {
            LengthUnit::from_symbol(&q.unit).map(|unit| unit.length(q.value))
        })
    }

    fn duration(&self, key: &str, default_unit: TimeUnit) -> Result<Option<Time>, EphemerisError> {
        scaled(self.get(key), key, |value| default_unit.time(value), |q| {
            TimeUnit::from_symbol(&q.unit).map(|unit| unit.time(q.value))
        })
    }

    /// Angle in degrees unless tagged otherwise
    fn angle(&self, key: &str) -> Result<Option<Angle>, EphemerisError> {
        scaled(self.get(key), key, Angle::from_degrees, |q| {
            AngleUnit::from_symbol(&q.unit).map(|unit| unit.angle(q.value))
        })
    }

    /// TDB Julian date
    fn epoch(&self, key: &str) -> Result<Option<f64>, EphemerisError> {
        self.number(key)
    }
}

fn scaled<T>(
    property: Option<&Property>,
    key: &str,
    bare: impl FnOnce(f64) -> T,
    tagged: impl FnOnce(&Quantity) -> Option<T>,
) -> Result<Option<T>, EphemerisError> {
    match property {
        None => Ok(None),
        Some(Property::Number(value)) => Ok(Some(bare(*value))),
        Some(Property::Quantity(q)) => tagged(q).map(Some).ok_or_else(|| EphemerisError::UnknownUnit {
            key: key.to_string(),
            unit: q.unit.clone(),
        }),
        Some(_) => Err(EphemerisError::WrongPropertyType(key.to_string())),
    }
}

/// Builds an elliptical orbit from catalog keys.
///
/// `planet_units` selects the default units for bare numbers: AU and
/// Julian years when set (planets around a star), kilometres and days
/// otherwise (moons). Either `SemiMajorAxis` or `PericenterDistance` and a
/// `Period` are required; every angle defaults to zero and the epoch to
/// J2000. `LongOfPericenter` and `MeanLongitude` may stand in for the
/// argument of pericenter and the mean anomaly.
///
/// # Examples
///
/// ```
/// use ephemeris::{Orbit, Property, PropertyMap, elliptical_orbit_from_properties};
///
/// let props = PropertyMap::new()
///     .with("SemiMajorAxis", Property::Number(1.0))
///     .with("Period", Property::Number(1.0));
/// let orbit = elliptical_orbit_from_properties(&props, true).unwrap();
///
/// assert!((orbit.period() - 365.25).abs() < 1e-9);
/// ```
pub fn elliptical_orbit_from_properties(
    props: &impl PropertySource,
    planet_units: bool,
) -> Result<EllipticalOrbit, EphemerisError> {
    let (length_unit, time_unit) = if planet_units {
        (LengthUnit::AstronomicalUnits, TimeUnit::Years)
    } else {
        (LengthUnit::Kilometers, TimeUnit::Days)
    };

    let eccentricity = props.number("Eccentricity")?.unwrap_or(0.0);

    let pericenter_distance = match props.length("SemiMajorAxis", length_unit)? {
        Some(a) => a * (1.0 - eccentricity),
        None => props
            .length("PericenterDistance", length_unit)?
            .ok_or_else(|| EphemerisError::MissingProperty("SemiMajorAxis".to_string()))?,
    };

    let period = props
        .duration("Period", time_unit)?
        .ok_or_else(|| EphemerisError::MissingProperty("Period".to_string()))?;

    let inclination = props.angle("Inclination")?.unwrap_or(Angle::zero());
    let ascending_node = props.angle("AscendingNode")?.unwrap_or(Angle::zero());

    let arg_of_periapsis = match props.angle("ArgOfPericenter")? {
        Some(arg) => arg,
        None => props
            .angle("LongOfPericenter")?
            .map(|long| long - ascending_node)
            .unwrap_or(Angle::zero()),
    };

    let mean_anomaly = match props.angle("MeanAnomaly")? {
        Some(anomaly) => anomaly,
        None => props
            .angle("MeanLongitude")?
            .map(|long| long - (arg_of_periapsis + ascending_node))
            .unwrap_or(Angle::zero()),
    };

    let epoch = props.epoch("Epoch")?.unwrap_or(J2000);

    EllipticalOrbit::new(OrbitalElements {
        pericenter_distance,
        eccentricity,
        inclination,
        ascending_node,
        arg_of_periapsis,
        mean_anomaly,
        period,
        epoch,
    })
}

/// Builds whichever orbit the properties define.
///
/// Recognises a nested `EllipticalOrbit` map and a `FixedPosition` vector
/// (AU when `planet_units` is set, else km), in that order.
pub fn orbit_from_properties(
    props: &impl PropertySource,
    planet_units: bool,
) -> Result<Arc<dyn Orbit>, EphemerisError> {
    if let Some(elements) = props.map("EllipticalOrbit")? {
        let orbit = elliptical_orbit_from_properties(elements, planet_units)?;
        return Ok(Arc::new(orbit));
    }

    if let Some(position) = props.vector("FixedPosition")? {
        let scale = if planet_units { KM_PER_AU } else { 1.0 };
        return Ok(Arc::new(FixedOrbit::new(position * scale)));
    }

    Err(EphemerisError::NoOrbitDefinition)
}
