use crate::math::vector::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Coordinate axis used for single-axis Euler construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Unit quaternion stored scalar-last (`x, y, z, w`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`. A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let Some(unit) = axis.normalized() else {
            return Self::IDENTITY;
        };
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(unit.x * s, unit.y * s, unit.z * s, half.cos())
    }

    pub fn from_axis_angle_deg(axis: Vec3, degrees: f64) -> Self {
        Self::from_axis_angle(axis, degrees.to_radians())
    }

    /// Single-axis Euler rotation, angle in degrees.
    pub fn from_euler(axis: Axis, degrees: f64) -> Self {
        Self::from_axis_angle_deg(axis.unit(), degrees)
    }

    pub fn from_rotvec(rotvec: Vec3) -> Self {
        let angle = rotvec.norm();
        let scale = if angle <= 1e-3 {
            let a2 = angle * angle;
            0.5 - a2 / 48.0 + a2 * a2 / 3840.0
        } else {
            (angle * 0.5).sin() / angle
        };
        let v = rotvec * scale;
        Self::new(v.x, v.y, v.z, (angle * 0.5).cos())
    }

    /// Rotation vector with angle in `[0, π]`; the quaternion is flipped to `w >= 0` first.
    pub fn to_rotvec(self) -> Vec3 {
        let q = if self.w < 0.0 { -self } else { self };
        let v = Vec3::new(q.x, q.y, q.z);
        let angle = 2.0 * v.norm().atan2(q.w);
        let scale = if angle <= 1e-3 {
            let a2 = angle * angle;
            2.0 + a2 / 12.0 + 7.0 * a2 * a2 / 2880.0
        } else {
            angle / (angle * 0.5).sin()
        };
        v * scale
    }

    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n > 0.0 {
            Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotation angle in radians, in `[0, π]`.
    pub fn angle(self) -> f64 {
        self.to_rotvec().norm()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        let (a, b) = (self, rhs);
        Quaternion::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}
