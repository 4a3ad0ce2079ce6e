mod tests {
    use approx::assert_relative_eq;

    use crate::time::{
        DAYS_PER_JULIAN_YEAR, J2000, SECONDS_PER_DAY, Time, julian_centuries_since_j2000,
    };

    #[test]
    fn test_time_conversions() {
        let year = Time::from_years(1.0);
        assert_relative_eq!(year.to_days(), DAYS_PER_JULIAN_YEAR);

        let day = Time::from_seconds(SECONDS_PER_DAY);
        assert_relative_eq!(day.to_days(), 1.0);

        let minute = Time::from_minutes(1.0);
        assert_relative_eq!(minute.to_days(), 1.0 / 1440.0);
        assert_relative_eq!(minute.to_seconds(), 60.0);

        let hours = Time::from_hours(36.0);
        assert_relative_eq!(hours.to_days(), 1.5);
        assert_relative_eq!(hours.to_hours(), 36.0);

        let sum = Time::from_days(10.0) + Time::from_days(5.0);
        assert_relative_eq!(sum.to_days(), 15.0);
        assert_relative_eq!((sum / 3.0).to_days(), 5.0);
    }

    #[test]
    fn test_julian_centuries() {
        assert_relative_eq!(julian_centuries_since_j2000(J2000), 0.0);
        assert_relative_eq!(julian_centuries_since_j2000(J2000 + 36_525.0), 1.0);
        assert_relative_eq!(julian_centuries_since_j2000(J2000 - 18_262.5), -0.5);
    }
}
