//! Quaternion algebra for orientation and direction math.
//!
//! Pure value operations. Rotation quaternions are expected to be unit-norm;
//! nothing here renormalizes implicitly.

use std::ops::Mul;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::error::{SimError, SimResult};

/// Quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Lift a 3d vector to a pure quaternion `(0, v)`.
    pub fn from_vector(v: DVec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    fn from_parts(w: f64, v: DVec3) -> Self {
        Self::new(w, v.x, v.y, v.z)
    }

    /// Imaginary part as a 3d vector.
    pub fn vector(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Euclidean norm over all four components.
    pub fn norm(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Hamilton product `self * other`. Non-commutative.
    pub fn multiply(self, other: Quaternion) -> Quaternion {
        let a = self.vector();
        let b = other.vector();
        let w = self.w * other.w - a.dot(b);
        let v = b * self.w + a * other.w + a.cross(b);
        Self::from_parts(w, v)
    }

    /// Conjugate. Only a true inverse for unit quaternions.
    pub fn inverse(self) -> Quaternion {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// True multiplicative inverse `conj(q) / |q|²`.
    pub fn reciprocal(self) -> SimResult<Quaternion> {
        let norm_sq = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;
        if norm_sq < EPSILON * EPSILON {
            return Err(SimError::DivisionByZero("reciprocal of zero quaternion"));
        }
        let c = self.inverse();
        Ok(Self::new(
            c.w / norm_sq,
            c.x / norm_sq,
            c.y / norm_sq,
            c.z / norm_sq,
        ))
    }

    /// Scale to unit norm.
    pub fn normalize(self) -> SimResult<Quaternion> {
        let n = self.norm();
        if n < EPSILON {
            return Err(SimError::DivisionByZero("normalize zero quaternion"));
        }
        Ok(Self::new(self.w / n, self.x / n, self.y / n, self.z / n))
    }

    /// Rotate a single vector: `q * (0, v) * q⁻¹`.
    pub fn rotate_vector(self, v: DVec3) -> DVec3 {
        self.rotate_with(v, self.inverse())
    }

    /// Rotate many vectors by the same quaternion.
    ///
    /// Produces exactly the values `rotate_vector` would for each element;
    /// only the conjugate is hoisted out of the loop.
    pub fn rotate_vectors(self, vectors: &[DVec3]) -> Vec<DVec3> {
        let inv = self.inverse();
        vectors.iter().map(|&v| self.rotate_with(v, inv)).collect()
    }

    fn rotate_with(self, v: DVec3, inv: Quaternion) -> DVec3 {
        self.multiply(Self::from_vector(v)).multiply(inv).vector()
    }

    /// Rotation of `degrees` about `axis` (right-handed). The axis need not be unit.
    pub fn from_axis_angle(axis: DVec3, degrees: f64) -> SimResult<Quaternion> {
        let len = axis.length();
        if len < EPSILON {
            return Err(SimError::DivisionByZero("rotation axis has zero length"));
        }
        let half = degrees.to_radians() / 2.0;
        Ok(Self::from_parts(half.cos(), axis / len * half.sin()))
    }

    /// World unit axes rotated by the inverse of `self`.
    ///
    /// For an orientation quaternion this is the (forward, left, up) frame
    /// expressed in world coordinates.
    pub fn rotated_axes(self) -> [DVec3; 3] {
        let inv = self.inverse();
        [
            inv.rotate_vector(DVec3::X),
            inv.rotate_vector(DVec3::Y),
            inv.rotate_vector(DVec3::Z),
        ]
    }

    /// Shortest-arc rotation taking direction `from` onto direction `to`.
    pub fn rotation_between(from: DVec3, to: DVec3) -> SimResult<Quaternion> {
        let (from_len, to_len) = (from.length(), to.length());
        if from_len < EPSILON || to_len < EPSILON {
            return Err(SimError::DivisionByZero("rotation between zero vectors"));
        }
        let f = from / from_len;
        let t = to / to_len;
        let d = f.dot(t).clamp(-1.0, 1.0);
        if d > 1.0 - EPSILON {
            return Ok(Self::IDENTITY);
        }
        if d < -1.0 + EPSILON {
            // Antiparallel: any perpendicular axis works.
            let helper = if f.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
            return Self::from_axis_angle(f.cross(helper), 180.0);
        }
        Self::from_axis_angle(f.cross(t), d.acos().to_degrees())
    }

    /// Quaternion natural logarithm.
    pub fn ln(self) -> Quaternion {
        let v = self.vector();
        let r = v.length();
        let t = if r > EPSILON { r.atan2(self.w) / r } else { 0.0 };
        let norm_sq = self.w * self.w + r * r;
        Self::from_parts(0.5 * norm_sq.ln(), v * t)
    }

    /// Quaternion exponential.
    pub fn exp(self) -> Quaternion {
        let v = self.vector();
        let r = v.length();
        let et = self.w.exp();
        let s = if r > EPSILON { et * r.sin() / r } else { 0.0 };
        Self::from_parts(et * r.cos(), v * s)
    }

    /// Fractional power `exp(n * ln(q))`, used to interpolate rotations.
    pub fn powf(self, n: f64) -> Quaternion {
        (self.ln() * n).exp()
    }

    /// Rotate `fraction` of the way from `self` toward `target` along the short arc.
    pub fn slerp_toward(self, target: Quaternion, fraction: f64) -> Quaternion {
        let mut delta = target.multiply(self.inverse());
        if delta.w < 0.0 {
            delta = delta * -1.0;
        }
        delta.powf(fraction).multiply(self)
    }

    /// Component-wise closeness check.
    pub fn approx_eq(self, other: Quaternion, tolerance: f64) -> bool {
        (self.w - other.w).abs() <= tolerance
            && (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: f64) -> Quaternion {
        Quaternion::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
