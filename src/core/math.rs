// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a signed value so its magnitude never exceeds `limit`
pub fn clamp_magnitude(value: f32, limit: f32) -> f32 {
    clamp(value, -limit, limit)
}

/// Convert "fraction of velocity kept per second" damping into a linear
/// damping coefficient (`v' = -c * v`).
///
/// 1.0 keeps all velocity (coefficient 0). Values are clamped into (0, 1].
pub fn retained_to_linear_damping(retained_per_second: f32) -> f32 {
    let retained = clamp(retained_per_second, f32::MIN_POSITIVE, 1.0);
    -retained.ln()
}

/// -1.0, 0.0 or 1.0 from a pair of opposing booleans; both held cancel out
pub fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_magnitude() {
        assert_eq!(clamp_magnitude(500.0, 450.0), 450.0);
        assert_eq!(clamp_magnitude(-500.0, 450.0), -450.0);
        assert_eq!(clamp_magnitude(-12.0, 450.0), -12.0);
    }

    #[test]
    fn test_retained_damping() {
        assert_relative_eq!(retained_to_linear_damping(1.0), 0.0);
        assert_relative_eq!(retained_to_linear_damping(0.0001), 9.2103, epsilon = 1e-3);
        // Above 1.0 would mean gaining speed
        assert_relative_eq!(retained_to_linear_damping(3.0), 0.0);
        assert!(retained_to_linear_damping(0.0).is_finite());
    }

    #[test]
    fn test_axis_cancels() {
        assert_eq!(axis(true, false), -1.0);
        assert_eq!(axis(false, true), 1.0);
        assert_eq!(axis(true, true), 0.0);
        assert_eq!(axis(false, false), 0.0);
    }
}
