//! Camera translation directions

use crate::types::Vec3;

/// A direction the free camera can be translated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// The basis a direction moves along, before its sign is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Basis {
    /// The camera's current look direction
    Front,
    /// `normalize(cross(front, up))`
    Side,
    /// Fixed world +Y, independent of camera tilt
    WorldUp,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    fn basis(self) -> (Basis, f32) {
        match self {
            Direction::Forward => (Basis::Front, 1.0),
            Direction::Backward => (Basis::Front, -1.0),
            Direction::Left => (Basis::Side, -1.0),
            Direction::Right => (Basis::Side, 1.0),
            Direction::Up => (Basis::WorldUp, 1.0),
            Direction::Down => (Basis::WorldUp, -1.0),
        }
    }

    /// Unit vector for this direction given the camera's `front` and `up`.
    pub fn unit_vector(self, front: Vec3, up: Vec3) -> Vec3 {
        let (basis, sign) = self.basis();
        let axis = match basis {
            Basis::Front => front,
            Basis::Side => front.cross(&up).normalized(),
            Basis::WorldUp => Vec3::UP,
        };
        axis * sign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_cancel() {
        let front = Vec3::new(0.3, -0.2, -0.9).normalized();
        let pairs = [
            (Direction::Forward, Direction::Backward),
            (Direction::Left, Direction::Right),
            (Direction::Up, Direction::Down),
        ];
        for (a, b) in pairs {
            let sum = a.unit_vector(front, Vec3::UP) + b.unit_vector(front, Vec3::UP);
            assert!(sum.length() < 1e-6, "{:?} + {:?} = {:?}", a, b, sum);
        }
    }

    #[test]
    fn up_ignores_camera_tilt() {
        let tilted = Vec3::new(0.0, 0.99, -0.1).normalized();
        assert_eq!(Direction::Up.unit_vector(tilted, Vec3::UP), Vec3::UP);
        assert_eq!(Direction::Down.unit_vector(tilted, Vec3::UP), -Vec3::UP);
    }

    #[test]
    fn right_is_perpendicular_to_front() {
        let front = Vec3::new(1.0, 0.5, 0.0).normalized();
        let right = Direction::Right.unit_vector(front, Vec3::UP);
        assert!(right.dot(&front).abs() < 1e-6);
        assert!((right.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn all_directions_are_listed_once() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
