pub mod angle;
pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod time_test;

pub use angle::Angle;
pub use length::{KM_PER_AU, KM_PER_LIGHT_YEAR, Length};
pub use mass::{EARTH_MASS_KG, Mass, SOLAR_MASS_KG};
pub use time::{
    DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, J2000, SECONDS_PER_DAY, Time,
    julian_centuries_since_j2000,
};
