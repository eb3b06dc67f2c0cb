//! Game settings, validated once before the terminal is touched and read-only
//! afterwards.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Largest board side. Frames are redrawn by moving the cursor up one row
/// per board row, and crossterm counts rows in `u16`.
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Frames per second at speed 1.0
const BASE_FPS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidWidth(usize),
    InvalidHeight(usize),
    InvalidSpeed(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWidth(w) => write!(f, "width must be between 1 and {}, got {}", MAX_DIMENSION, w),
            ConfigError::InvalidHeight(h) => write!(f, "height must be between 1 and {}, got {}", MAX_DIMENSION, h),
            ConfigError::InvalidSpeed(s) => write!(f, "speed must be a positive number giving a representable tick interval, got {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    width: usize,
    height: usize,
    speed: f64,
    seed: Option<u64>,
    tick_interval: Duration,
}

impl Config {
    pub fn new(width: usize, height: usize, speed: f64, seed: Option<u64>) -> Result<Self, ConfigError> {
        if width == 0 || width > MAX_DIMENSION {
            return Err(ConfigError::InvalidWidth(width));
        }
        if height == 0 || height > MAX_DIMENSION {
            return Err(ConfigError::InvalidHeight(height));
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }

        // A tiny speed makes the interval too long for a Duration
        let tick_interval = Duration::try_from_secs_f64(1.0 / (BASE_FPS * speed))
            .map_err(|_| ConfigError::InvalidSpeed(speed))?;

        Ok(Config { width, height, speed, seed, tick_interval })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Fixed RNG seed for food placement, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Time between unprompted ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed: DEFAULT_SPEED,
            seed: None,
            tick_interval: Duration::from_secs_f64(1.0 / (BASE_FPS * DEFAULT_SPEED)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.width(), 10);
        assert_eq!(config.height(), 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert!(config.seed().is_none());
    }

    #[test]
    fn speed_scales_interval() {
        let config = Config::new(10, 10, 2.0, None).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(Config::new(0, 10, 1.0, None), Err(ConfigError::InvalidWidth(0)));
        assert_eq!(Config::new(10, 0, 1.0, None), Err(ConfigError::InvalidHeight(0)));
    }

    #[test]
    fn rejects_bad_speed() {
        assert!(matches!(Config::new(5, 5, 0.0, None), Err(ConfigError::InvalidSpeed(_))));
        assert!(matches!(Config::new(5, 5, -1.5, None), Err(ConfigError::InvalidSpeed(_))));
        assert!(matches!(Config::new(5, 5, f64::NAN, None), Err(ConfigError::InvalidSpeed(_))));
        assert!(matches!(Config::new(5, 5, f64::INFINITY, None), Err(ConfigError::InvalidSpeed(_))));
        assert!(matches!(Config::new(5, 5, 1e-20, None), Err(ConfigError::InvalidSpeed(_))));
        assert!(matches!(Config::new(5, 5, f64::MIN_POSITIVE, None), Err(ConfigError::InvalidSpeed(_))));
    }

    #[test]
    fn slow_but_representable_speed() {
        let config = Config::new(5, 5, 0.001, None).unwrap();
        let secs = config.tick_interval().as_secs_f64();
        assert!((secs - 250.0).abs() < 1e-6, "got {}s", secs);
    }

    #[test]
    fn rejects_oversized_board() {
        assert_eq!(Config::new(70_000, 10, 1.0, None), Err(ConfigError::InvalidWidth(70_000)));
        assert_eq!(Config::new(1, 70_000, 1.0, None), Err(ConfigError::InvalidHeight(70_000)));
        assert_eq!(Config::new(usize::MAX, 10, 1.0, None), Err(ConfigError::InvalidWidth(usize::MAX)));

        let tallest = Config::new(1, MAX_DIMENSION, 1.0, None).unwrap();
        assert_eq!(tallest.height(), 65_535);
    }

    #[test]
    fn error_messages() {
        let err = Config::new(10, 10, 0.0, None).unwrap_err();
        assert_eq!(err.to_string(), "speed must be a positive number giving a representable tick interval, got 0");

        let err = Config::new(0, 10, 1.0, None).unwrap_err();
        assert_eq!(err.to_string(), "width must be between 1 and 65535, got 0");
    }
}
