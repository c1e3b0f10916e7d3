// Movement/animation thresholds and their validation

/// Errors raised when a character is built from unusable configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be at least 1")]
    EmptyFrameSet { name: &'static str },

    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("{name} has {actual} textures but the configuration expects {expected}")]
    TextureCountMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Thresholds driving facing hysteresis and distance-based frame cycling.
///
/// Defaults mirror a 60 Hz simulation in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Horizontal displacement per tick below which the character counts as stationary
    pub dead_zone_x: f32,
    /// Vertical displacement per tick below which jump/fall art is not chosen
    pub dead_zone_y: f32,
    /// Distance walked before the next walk frame is shown
    pub walk_distance_threshold: f32,
    /// Distance climbed before the next climb frame is shown
    pub climb_distance_threshold: f32,
    /// Number of frames in the walk cycle
    pub walk_frame_count: usize,
    /// Number of frames in the climb cycle
    pub climb_frame_count: usize,
}

pub const DEFAULT_MOVEMENT: MovementConfig = MovementConfig {
    dead_zone_x: 0.1,
    dead_zone_y: 0.1,
    walk_distance_threshold: 20.0,
    climb_distance_threshold: 20.0,
    walk_frame_count: 8,
    climb_frame_count: 2,
};

impl Default for MovementConfig {
    fn default() -> Self {
        DEFAULT_MOVEMENT
    }
}

impl MovementConfig {
    /// Check every field, reporting the first offending one
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("dead_zone_x", self.dead_zone_x)?;
        check_threshold("dead_zone_y", self.dead_zone_y)?;
        check_threshold("walk_distance_threshold", self.walk_distance_threshold)?;
        check_threshold("climb_distance_threshold", self.climb_distance_threshold)?;

        if self.walk_frame_count == 0 {
            return Err(ConfigError::EmptyFrameSet {
                name: "walk_frame_count",
            });
        }
        if self.climb_frame_count == 0 {
            return Err(ConfigError::EmptyFrameSet {
                name: "climb_frame_count",
            });
        }

        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_walk_frames_rejected() {
        let config = MovementConfig {
            walk_frame_count: 0,
            ..MovementConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyFrameSet {
                name: "walk_frame_count"
            })
        );
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = MovementConfig {
            climb_distance_threshold: -1.0,
            ..MovementConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "climb_distance_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_dead_zone_rejected() {
        let config = MovementConfig {
            dead_zone_x: f32::NAN,
            ..MovementConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::TextureCountMismatch {
            name: "walk",
            expected: 8,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "walk has 3 textures but the configuration expects 8"
        );
    }
}
