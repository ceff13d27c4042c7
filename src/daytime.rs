//! Day/night classification for `auto`.
//!
//! Day runs from 07:00 up to, but not including, 18:00 local time.

use chrono::{Local, Timelike};

/// First hour of the day period
pub const DAY_START_HOUR: u32 = 7;
/// First hour of the night period
pub const NIGHT_START_HOUR: u32 = 18;

/// Profile name used during the day
pub const LIGHT: &str = "light";
/// Profile name used at night
pub const DARK: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Night,
}

impl Period {
    /// Classify a 24-hour clock hour
    pub fn for_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            Self::Day
        } else {
            Self::Night
        }
    }

    /// The well-known profile for this period
    pub fn profile_name(self) -> &'static str {
        match self {
            Self::Day => LIGHT,
            Self::Night => DARK,
        }
    }
}

/// The current local hour
pub fn current_hour() -> u32 {
    Local::now().hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Period::for_hour(0), Period::Night);
        assert_eq!(Period::for_hour(6), Period::Night);
        assert_eq!(Period::for_hour(7), Period::Day);
        assert_eq!(Period::for_hour(17), Period::Day);
        assert_eq!(Period::for_hour(18), Period::Night);
        assert_eq!(Period::for_hour(23), Period::Night);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(Period::for_hour(12).profile_name(), "light");
        assert_eq!(Period::for_hour(3).profile_name(), "dark");
    }

    #[test]
    fn test_current_hour_in_range() {
        assert!(current_hour() < 24);
    }
}
