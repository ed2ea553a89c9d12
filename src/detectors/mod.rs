//! Level and candlestick detectors
//!
//! # Detector Categories
//!
//! - **Levels**: support/resistance from clustered local extrema
//! - **Touch**: level-based and rolling-window touch validation
//! - **Patterns**: hammer, shooting star, engulfing, pin bar, doji

pub mod helpers;
pub mod levels;
pub mod patterns;
pub mod touch;

// Re-export all detectors for convenience
pub use helpers::*;
pub use levels::*;
pub use patterns::*;
pub use touch::*;
