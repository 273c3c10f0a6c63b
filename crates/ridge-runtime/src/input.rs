//! Input state management

use ridge_core::Direction;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Tracks held keys and the locked-cursor position between frames
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,

    /// Position built by summing every raw motion delta.
    ///
    /// Stands in for the cursor position while the OS cursor is locked.
    virtual_cursor: (f64, f64),

    /// Direction map: camera direction -> bound keys
    direction_map: HashMap<Direction, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            virtual_cursor: (0.0, 0.0),
            direction_map: Self::default_direction_map(),
        }
    }

    fn default_direction_map() -> HashMap<Direction, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(Direction::Forward, vec![KeyCode::KeyW]);
        map.insert(Direction::Backward, vec![KeyCode::KeyS]);
        map.insert(Direction::Left, vec![KeyCode::KeyA]);
        map.insert(Direction::Right, vec![KeyCode::KeyD]);
        map.insert(Direction::Up, vec![KeyCode::KeyQ]);
        map.insert(Direction::Down, vec![KeyCode::KeyZ]);
        map
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process raw mouse delta (device motion, for locked cursor).
    ///
    /// Returns the updated virtual cursor position.
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            log::debug!("Ignoring non-finite mouse delta ({}, {})", dx, dy);
            return self.virtual_cursor;
        }
        self.virtual_cursor.0 += dx;
        self.virtual_cursor.1 += dy;
        self.virtual_cursor
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    /// Is any key bound to `direction` held?
    pub fn is_direction_pressed(&self, direction: Direction) -> bool {
        self.direction_map
            .get(&direction)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Held directions, in `Direction::ALL` order
    pub fn pressed_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_direction_pressed(*d))
            .collect()
    }

    pub fn virtual_cursor(&self) -> (f64, f64) {
        self.virtual_cursor
    }
}
