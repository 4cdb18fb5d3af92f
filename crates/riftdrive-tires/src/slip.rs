use riftdrive_core::{Scalar, MIN_SLIP_SPEED};

/// `(ωr − v) / |v|`; zero while `|v|` is under the slip threshold.
#[inline]
pub fn slip_ratio(wheel_surface_speed: Scalar, vehicle_speed: Scalar) -> Scalar {
    if vehicle_speed.abs() < MIN_SLIP_SPEED { return 0.0; }
    (wheel_surface_speed - vehicle_speed) / vehicle_speed.abs()
}

/// Angle of the velocity in the wheel frame; zero while `chassis_speed` is under the threshold.
#[inline]
pub fn slip_angle(v_long: Scalar, v_lat: Scalar, chassis_speed: Scalar) -> Scalar {
    if chassis_speed < MIN_SLIP_SPEED { return 0.0; }
    v_lat.atan2(v_long)
}

/// `sqrt(κ² + tan²α) ^ exponent`.
#[inline]
pub fn combined_slip(slip_ratio: Scalar, slip_angle: Scalar, exponent: Scalar) -> Scalar {
    let t = slip_angle.tan();
    (slip_ratio * slip_ratio + t * t).sqrt().powf(exponent)
}
