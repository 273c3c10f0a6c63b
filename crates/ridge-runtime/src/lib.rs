//! Ridge Runtime - frame loop building blocks
//!
//! - `FrameClock` measures the time between rendered frames
//! - `InputState` tracks held keys, maps them to camera directions and
//!   turns raw mouse motion into a virtual cursor position

mod clock;
mod input;

pub use clock::{movement_speed, FrameClock, MAX_FRAME_DELTA};
pub use input::InputState;
