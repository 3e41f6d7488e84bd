//! Throttle window validation.

use super::error::ThrottleError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Largest window accepted, in milliseconds.
///
/// Matches the ceiling of browser timers (a signed 32-bit millisecond count);
/// anything larger would fire immediately there instead of being deferred.
pub const MAX_WINDOW_MS: u64 = i32::MAX as u64;

/// A validated minimum interval between two executions of a throttled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ThrottleWindow(Duration);

impl ThrottleWindow {
    /// Builds a window from whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ThrottleError::InvalidConfiguration`] if `millis` exceeds
    /// [`MAX_WINDOW_MS`].
    pub fn from_millis(millis: u64) -> Result<Self, ThrottleError> {
        if millis > MAX_WINDOW_MS {
            return Err(invalid(millis, "exceeds the maximum timer delay"));
        }
        Ok(Self(Duration::from_millis(millis)))
    }

    /// Returns the window as a [`Duration`].
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Returns the window in whole milliseconds.
    #[must_use]
    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }

    /// Returns true when the window never defers a call.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for ThrottleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}

impl TryFrom<Duration> for ThrottleWindow {
    type Error = ThrottleError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        if value > Duration::from_millis(MAX_WINDOW_MS) {
            return Err(invalid(
                format!("{value:?}"),
                "exceeds the maximum timer delay",
            ));
        }
        Ok(Self(value))
    }
}

impl TryFrom<u64> for ThrottleWindow {
    type Error = ThrottleError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl TryFrom<i64> for ThrottleWindow {
    type Error = ThrottleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let millis = u64::try_from(value).map_err(|_| invalid(value, "must not be negative"))?;
        Self::from_millis(millis)
    }
}

impl TryFrom<f64> for ThrottleWindow {
    type Error = ThrottleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(invalid(value, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(invalid(value, "must not be negative"));
        }
        if value > MAX_WINDOW_MS as f64 {
            return Err(invalid(value, "exceeds the maximum timer delay"));
        }
        Ok(Self(Duration::from_secs_f64(value / 1000.0)))
    }
}

impl FromStr for ThrottleWindow {
    type Err = ThrottleError;

    /// Parses a millisecond count, integral or fractional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Self::try_from(millis);
        }
        match trimmed.parse::<f64>() {
            Ok(millis) => Self::try_from(millis),
            Err(_) => Err(invalid(s, "not a number of milliseconds")),
        }
    }
}

fn invalid(value: impl fmt::Display, reason: &'static str) -> ThrottleError {
    ThrottleError::InvalidConfiguration {
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_regular_windows() {
        assert!(ThrottleWindow::from_millis(0).unwrap().is_zero());
        assert_eq!(ThrottleWindow::from_millis(100).unwrap().as_millis(), 100);
        assert_eq!(
            ThrottleWindow::try_from(Duration::from_millis(250))
                .unwrap()
                .as_duration(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn rejects_negative_window() {
        let err = ThrottleWindow::try_from(-1_i64).unwrap_err();
        assert!(matches!(
            err,
            ThrottleError::InvalidConfiguration {
                reason: "must not be negative",
                ..
            }
        ));
        assert!(ThrottleWindow::try_from(-0.5_f64).is_err());
    }

    #[test]
    fn rejects_non_finite_and_oversized_windows() {
        assert!(ThrottleWindow::try_from(f64::NAN).is_err());
        assert!(ThrottleWindow::try_from(f64::INFINITY).is_err());
        assert!(ThrottleWindow::from_millis(MAX_WINDOW_MS + 1).is_err());
        assert!(ThrottleWindow::try_from(Duration::from_secs(u64::MAX)).is_err());
        assert!(ThrottleWindow::from_millis(MAX_WINDOW_MS).is_ok());
    }

    #[test]
    fn parses_strings() {
        assert_eq!("100".parse::<ThrottleWindow>().unwrap().as_millis(), 100);
        assert_eq!(" 16 ".parse::<ThrottleWindow>().unwrap().as_millis(), 16);
        assert_eq!(
            "12.5".parse::<ThrottleWindow>().unwrap().as_duration(),
            Duration::from_micros(12_500)
        );
        assert!("-3".parse::<ThrottleWindow>().is_err());
        assert!(matches!(
            "fast".parse::<ThrottleWindow>(),
            Err(ThrottleError::InvalidConfiguration {
                reason: "not a number of milliseconds",
                ..
            })
        ));
    }

    #[test]
    fn displays_as_millis() {
        assert_eq!(ThrottleWindow::from_millis(42).unwrap().to_string(), "42ms");
    }
}
