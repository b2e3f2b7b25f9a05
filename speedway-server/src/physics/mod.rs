use glam::DVec3;

pub mod bounding_box;

#[cfg(test)]
mod tests;

/// Overlap of two bounding circles on the track plane; checkpoint triggers
/// deliberately ignore height.
pub fn circles_overlap_xz(a: DVec3, a_radius: f64, b: DVec3, b_radius: f64) -> bool {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    let reach = a_radius + b_radius;
    dx * dx + dz * dz <= reach * reach
}

/// proj_v(u) = v * (v . u) / |v|^2
pub fn project_onto(u: DVec3, v: DVec3) -> DVec3 {
    v * (v.dot(u) / v.length_squared())
}

// Rotate a vector about the Y axis by theta radians counterclockwise.
// Refer to https://en.wikipedia.org/wiki/Rotation_matrix for the formula used here
pub fn rotate_about_y(v: DVec3, theta: f64) -> DVec3 {
    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    DVec3::new(
        v.x * cos_theta - v.z * sin_theta,
        v.y,
        v.x * sin_theta + v.z * cos_theta,
    )
}
