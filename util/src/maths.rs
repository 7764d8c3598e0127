//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of turns above which [`wrap_pi`] reduces the angle with a
/// remainder before unwinding it.
const WRAP_PI_MAX_TURNS: f64 = 64.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + std::ops::AddAssign,
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    let mut sum = T::zero();

    for (a, b) in point_0.iter().zip(point_1.iter()) {
        sum += (*a - *b).powi(2);
    }

    Some(sum.sqrt())
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle into the range (-pi, pi].
///
/// The angle is unwound by whole turns. Angles more than a few tens of turns
/// away from zero are first reduced into [0, 2pi) so the unwinding always
/// terminates. Non-finite angles are returned unchanged.
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float,
{
    if !angle.is_finite() {
        return angle;
    }

    let pi_t = T::from(std::f64::consts::PI).unwrap_or_else(T::zero);
    let tau_t = pi_t + pi_t;
    let max_t = T::from(WRAP_PI_MAX_TURNS).unwrap_or_else(T::one) * tau_t;

    let mut wrapped = if angle.abs() > max_t {
        rem_euclid(angle, tau_t)
    } else {
        angle
    };

    while wrapped > pi_t {
        wrapped = wrapped - tau_t;
    }
    while wrapped <= -pi_t {
        wrapped = wrapped + tau_t;
    }

    wrapped
}
