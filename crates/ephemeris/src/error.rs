use thiserror::Error;

/// Errors raised while constructing orbits.
///
/// Evaluating an orbit never fails; only building one from elements, state
/// vectors, tables or catalog properties can.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("eccentricity {0} is outside the elliptical range [0, 1)")]
    InvalidEccentricity(f64),

    #[error("orbital period must be positive, got {0} days")]
    InvalidPeriod(f64),

    #[error("pericenter distance must be positive, got {0} km")]
    InvalidPericenter(f64),

    #[error("validity interval [{begin}, {end}) is empty")]
    EmptyInterval { begin: f64, end: f64 },

    #[error("state vector does not describe a bound elliptical orbit (eccentricity {eccentricity})")]
    UnboundOrbit { eccentricity: f64 },

    #[error("state vector has zero radius or zero angular momentum")]
    DegenerateStateVector,

    #[error("trajectory needs at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("trajectory sample times must strictly increase (sample {0})")]
    UnorderedSamples(usize),

    #[error("missing required property `{0}`")]
    MissingProperty(String),

    #[error("property `{key}` has an unsupported unit `{unit}`")]
    UnknownUnit { key: String, unit: String },

    #[error("property `{0}` has the wrong type")]
    WrongPropertyType(String),

    #[error("no supported orbit definition found")]
    NoOrbitDefinition,
}
