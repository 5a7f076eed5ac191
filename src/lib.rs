#![warn(clippy::all, clippy::cargo)]

mod buffer;
mod error;
mod kernel;
mod layout;
mod naive;
mod pattern;
mod rng;
mod sim;
mod timing;
mod utils;

pub use buffer::PackedBuffer;
pub use error::{Error, Result};
pub use kernel::advance;
pub use layout::Layout;
pub use naive::advance_naive;
pub use pattern::Pattern;
pub use rng::Xorshift96;
pub use sim::Simulation;
pub use timing::{timed_advance, Band, FrameBudget, StepCounter, WallClockCounter};
pub use utils::NiceInt;
