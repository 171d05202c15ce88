//! Easing curves for point transitions.
//!
//! The vertex shader carries the same formulas; `shader_code` selects the
//! branch there.

/// Easing function variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow end.
    #[default]
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the curve at `t`.
    ///
    /// Input is clamped to [0.0, 1.0], and so is the result.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => cubic_in_out(t),
        }
    }

    /// Branch selector passed to the vertex shader.
    #[must_use]
    pub fn shader_code(&self) -> f32 {
        match self {
            Self::Linear => 0.0,
            Self::CubicInOut => 1.0,
        }
    }
}

/// `2t` cubed on the way up, mirrored on the way down, halved.
#[inline]
#[must_use]
pub fn cubic_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    let eased = if t <= 1.0 {
        t * t * t
    } else {
        let u = t - 2.0;
        u * u * u + 2.0
    };
    (eased / 2.0).clamp(0.0, 1.0)
}
