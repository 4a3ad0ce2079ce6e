pub mod caching;
pub mod elliptical;
pub mod error;
pub mod fixed;
pub mod mixed;
pub mod orbit;
pub mod properties;
pub mod sampled;
pub mod sampling;
pub mod state_vector;

#[cfg(test)]
mod fixed_test;
#[cfg(test)]
mod state_vector_test;

pub use caching::{CachingOrbit, OrbitComputation};
pub use elliptical::{EllipticalOrbit, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, OrbitalElements};
pub use error::EphemerisError;
pub use fixed::FixedOrbit;
pub use mixed::MixedOrbit;
pub use orbit::{Orbit, OrbitExt, OrbitSample, Samples, VELOCITY_DIFF_DELTA, ValidRange};
pub use properties::{
    AngleUnit, LengthUnit, Property, PropertyMap, PropertySource, Quantity, TimeUnit,
    elliptical_orbit_from_properties, orbit_from_properties,
};
pub use sampled::SampledTrajectory;
pub use sampling::{
    AdaptiveSampler, AdaptiveSamplingParameters, DEFAULT_SAMPLES_PER_ORBIT, UniformSampler,
};
pub use state_vector::state_vector_to_orbit;
