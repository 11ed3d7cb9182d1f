//! Cosmetic simulators.
//!
//! Both are timer-driven and write straight to the view. They carry no
//! correctness contract and never interact with the poller.
//!
//! - [`circuit`]: one-shot hop-by-hop circuit building animation
//! - [`demo`]: repeating random metric generator for kiosk displays

pub mod circuit;
pub mod demo;

pub use circuit::CircuitAnimation;
pub use demo::DemoMode;
