//! Coordinate transforms.
//!
//! Pure functions that lift a detection from its sensor's local frame into
//! the vehicle ("ego") frame: spherical→cartesian conversion followed by the
//! rigid mounting-pose transform (quaternion rotation + translation).
//!
//! # Example
//!
//! ```rust
//! use vantage_model::transform::{to_cartesian, to_ego_frame};
//! use vantage_types::{MountingPose, Orientation3, Spherical3, Vec3};
//!
//! // A return 10 m straight ahead of a sensor mounted 1 m forward of the
//! // ego origin, facing forward.
//! let local = to_cartesian(Spherical3::new(10.0, 0.0, 0.0));
//! let pose = MountingPose::new(Vec3::new(1.0, 0.0, 0.0), Orientation3::zero());
//! let ego = to_ego_frame(local, &pose);
//! assert!((ego.x - 11.0).abs() < 1e-9);
//! ```

use vantage_types::{MountingPose, Orientation3, Spherical3, Vec3};

// ────────────────────────────────────────────────────────────────────────────
// Quaternion
// ────────────────────────────────────────────────────────────────────────────

/// A unit quaternion representing a 3-D rotation (w, x, y, z convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Create a quaternion.  The caller is responsible for providing a unit
    /// quaternion (|q| = 1).
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation (no rotation).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Build the rotation described by Euler angles: yaw about z, then pitch
    /// about y, then roll about x.
    pub fn from_euler(orientation: Orientation3) -> Self {
        let (sr, cr) = (orientation.roll * 0.5).sin_cos();
        let (sp, cp) = (orientation.pitch * 0.5).sin_cos();
        let (sy, cy) = (orientation.yaw * 0.5).sin_cos();
        Self::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }

    /// Hamilton product: compose two rotations.
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotate a vector by this quaternion: p' = q * p * q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // Express v as a pure quaternion.
        let p = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self.mul(p).mul(self.conjugate());
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Frame conversion
// ────────────────────────────────────────────────────────────────────────────

/// Convert a spherical position into cartesian coordinates in the same frame:
/// x = d·cos(e)·cos(a), y = d·cos(e)·sin(a), z = d·sin(e).
pub fn to_cartesian(spherical: Spherical3) -> Vec3 {
    let (sin_elevation, cos_elevation) = spherical.elevation.sin_cos();
    let (sin_azimuth, cos_azimuth) = spherical.azimuth.sin_cos();
    Vec3::new(
        spherical.distance * cos_elevation * cos_azimuth,
        spherical.distance * cos_elevation * sin_azimuth,
        spherical.distance * sin_elevation,
    )
}

/// Transform a sensor-local cartesian point into the ego frame: rotate by
/// the mounting orientation, then translate by the mounting position.
pub fn to_ego_frame(local: Vec3, pose: &MountingPose) -> Vec3 {
    Quaternion::from_euler(pose.orientation)
        .rotate(local)
        .add(pose.position)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
