//! # Proximity sensor model
//!
//! Sensors are modelled as single rays. The distance along the ray to the nearest body footprint
//! is converted into a raw reading with a lookup table.

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Distance along a ray to an axis-aligned rectangle, `None` if the ray misses it.
///
/// The ray starts at `origin_m` and points along `angle_rad`. A ray starting inside the rectangle
/// hits it at a distance of zero.
pub fn ray_to_footprint(
    origin_m: [f64; 2],
    angle_rad: f64,
    centre_m: [f64; 2],
    half_extent_m: [f64; 2],
) -> Option<f64> {
    let dir = [angle_rad.cos(), angle_rad.sin()];

    let mut t_min = 0.0f64;
    let mut t_max = std::f64::INFINITY;

    for axis in 0..2 {
        let lo = centre_m[axis] - half_extent_m[axis];
        let hi = centre_m[axis] + half_extent_m[axis];

        if dir[axis].abs() < 1e-12 {
            // Parallel to this slab, either always inside it or never
            if origin_m[axis] < lo || origin_m[axis] > hi {
                return None;
            }
            continue;
        }

        let t0 = (lo - origin_m[axis]) / dir[axis];
        let t1 = (hi - origin_m[axis]) / dir[axis];

        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));

        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Convert a distance into a raw reading using the lookup table.
///
/// Readings are linearly interpolated between entries. Distances before the first entry read the
/// first entry, distances beyond the last entry read zero.
pub fn lookup_reading(table: &[[f64; 2]], dist_m: f64) -> f64 {
    let (first, last) = match (table.first(), table.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return 0.0,
    };

    if dist_m > last[0] {
        return 0.0;
    }

    if dist_m <= first[0] {
        return first[1];
    }

    for w in table.windows(2) {
        let (d0, r0) = (w[0][0], w[0][1]);
        let (d1, r1) = (w[1][0], w[1][1]);

        if dist_m <= d1 {
            let frac = (dist_m - d0) / (d1 - d0);
            return r0 + frac * (r1 - r0);
        }
    }

    last[1]
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
