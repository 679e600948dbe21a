//! Motion primitives for the page controller
//!
//! # Layout
//!
//! - `easing` - Named easing curves (shared vocabulary with the tweening library)
//! - `timing` - Pure time and interpolation helpers
//! - `momentum` - The momentum scroll engine built on top of both
//!
//! # Usage
//!
//! ```
//! use glide_core::motion::MomentumScroll;
//!
//! let mut engine = MomentumScroll::with_defaults();
//! engine.scroll_to(1000.0);
//!
//! // Once per animation frame
//! while engine.is_converging() {
//!     let _offset = engine.step();
//! }
//! assert_eq!(engine.current(), 1000.0);
//! ```

pub mod easing;
pub mod timing;

pub mod momentum;

pub use easing::EasingType;
pub use momentum::{anchor_target, MomentumScroll, ScrollPhase};
