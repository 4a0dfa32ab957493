use std::time::Duration;

/// A duration rendered in a fixed unit, e.g. `12.34ms` with `{:.2}`.
pub struct FormattedDuration {
    duration: Duration,
    unit: TimeUnit,
}

impl FormattedDuration {
    pub fn from(duration: Duration, unit: TimeUnit) -> Self {
        Self { duration, unit }
    }

    pub fn millis(duration: Duration) -> Self {
        Self::from(duration, TimeUnit::Milli)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TimeUnit {
    Micro = 1_000,
    Milli = 1_000_000,
    Sec = 1_000_000_000,
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self {
            TimeUnit::Micro => "µs",
            TimeUnit::Milli => "ms",
            TimeUnit::Sec => "s",
        };
        write!(f, "{}", unit)
    }
}

impl std::fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.duration.as_f64(self.unit).fmt(f).and_then(|_| write!(f, "{}", self.unit))
    }
}

pub trait DurationExt {
    fn appropriate_unit(&self) -> TimeUnit;
    fn as_f64(&self, unit: TimeUnit) -> f64;
}

impl DurationExt for Duration {
    fn appropriate_unit(&self) -> TimeUnit {
        match self.as_nanos() {
            n if n < TimeUnit::Milli as u128 => TimeUnit::Micro,
            n if n < TimeUnit::Sec as u128 => TimeUnit::Milli,
            _ => TimeUnit::Sec,
        }
    }

    fn as_f64(&self, unit: TimeUnit) -> f64 {
        self.as_nanos() as f64 / unit as u64 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_in_unit() {
        let d = Duration::from_micros(12_346);
        assert_eq!(format!("{:.2}", FormattedDuration::millis(d)), "12.35ms");
        assert_eq!(format!("{:.1}", FormattedDuration::from(d, TimeUnit::Sec)), "0.0s");
        assert!(matches!(d.appropriate_unit(), TimeUnit::Milli));
        assert!(matches!(Duration::from_nanos(10).appropriate_unit(), TimeUnit::Micro));
    }
}
