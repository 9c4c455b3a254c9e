//! Ship cockpit: orientation frame used for camera and default burn direction.

use glam::DVec3;

use deepspace_core::constants::EPSILON;
use deepspace_core::error::SimResult;
use deepspace_core::quaternion::Quaternion;
use deepspace_core::types::ObjectId;

#[derive(Debug, Clone, Default)]
pub struct Cockpit {
    /// Unit quaternion mapping world coordinates into the cockpit frame.
    pub orientation: Quaternion,
    /// Object the camera is following, if any.
    pub following: Option<ObjectId>,
}

impl Cockpit {
    /// Forward, left and up axes in world coordinates.
    pub fn axes(&self) -> [DVec3; 3] {
        self.orientation.rotated_axes()
    }

    pub fn forward(&self) -> DVec3 {
        self.axes()[0]
    }

    /// Rotate about the cockpit's own axes, in degrees. Applied yaw, pitch, roll.
    pub fn rotate(&mut self, yaw: f64, pitch: f64, roll: f64) -> SimResult<()> {
        let [forward, left, up] = self.axes();
        let mut frame = Quaternion::IDENTITY;
        for (axis, degrees) in [(up, yaw), (left, pitch), (forward, roll)] {
            if degrees != 0.0 {
                frame = Quaternion::from_axis_angle(axis, degrees)?.multiply(frame);
            }
        }
        // World-space frame rotation maps onto the orientation by its inverse.
        self.orientation = self.orientation.multiply(frame.inverse()).normalize()?;
        Ok(())
    }

    /// Point the forward axis along `direction`. A zero direction is ignored.
    pub fn look_at(&mut self, direction: DVec3) -> SimResult<()> {
        if direction.length() < EPSILON {
            log::warn!("cockpit cannot look along zero direction");
            return Ok(());
        }
        let to_direction = Quaternion::rotation_between(DVec3::X, direction)?;
        self.orientation = to_direction.inverse();
        Ok(())
    }

    /// Turn `fraction` of the way toward `direction`. A zero direction is ignored.
    pub fn turn_toward(&mut self, direction: DVec3, fraction: f64) -> SimResult<()> {
        if direction.length() < EPSILON {
            log::warn!("cockpit cannot turn toward zero direction");
            return Ok(());
        }
        let target = Quaternion::rotation_between(DVec3::X, direction)?.inverse();
        self.orientation = self
            .orientation
            .slerp_toward(target, fraction.clamp(0.0, 1.0))
            .normalize()?;
        Ok(())
    }

    pub fn follow(&mut self, target: ObjectId) {
        self.following = Some(target);
    }

    pub fn reset(&mut self) {
        self.orientation = Quaternion::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn test_default_faces_x() {
        let cockpit = Cockpit::default();
        assert_close(cockpit.forward(), DVec3::X);
    }

    #[test]
    fn test_look_at() {
        let mut cockpit = Cockpit::default();
        cockpit.look_at(DVec3::new(0.0, 0.0, -3.0)).unwrap();
        assert_close(cockpit.forward(), -DVec3::Z);
        cockpit.look_at(DVec3::new(-1.0, 0.0, 0.0)).unwrap();
        assert_close(cockpit.forward(), -DVec3::X);
        cockpit.look_at(DVec3::ZERO).unwrap();
        assert_close(cockpit.forward(), -DVec3::X);
    }

    #[test]
    fn test_yaw_turns_forward_about_up() {
        let mut cockpit = Cockpit::default();
        cockpit.rotate(90.0, 0.0, 0.0).unwrap();
        assert_close(cockpit.forward(), DVec3::Y);
        assert_close(cockpit.axes()[2], DVec3::Z);
        cockpit.rotate(-90.0, 0.0, 0.0).unwrap();
        assert_close(cockpit.forward(), DVec3::X);
    }

    #[test]
    fn test_pitch_then_roll_keeps_frame_orthonormal() {
        let mut cockpit = Cockpit::default();
        cockpit.rotate(30.0, 45.0, 10.0).unwrap();
        let [f, l, u] = cockpit.axes();
        assert!(f.dot(l).abs() < 1e-9);
        assert!(f.dot(u).abs() < 1e-9);
        assert!((f.length() - 1.0).abs() < 1e-9);
        assert_close(f.cross(l), u);
    }

    #[test]
    fn test_turn_toward_halfway() {
        let mut cockpit = Cockpit::default();
        cockpit.turn_toward(DVec3::Y, 0.5).unwrap();
        let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert_close(cockpit.forward(), expected);
    }
}
