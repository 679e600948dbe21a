pub mod config;
pub mod element;
pub mod error;
pub mod frame;
pub mod init;
pub mod motion;
pub mod rate;
pub mod reveal;
pub mod tween;
pub mod visibility;
pub mod widgets;

pub use config::{AppConfig, ScrollConfig};
pub use element::{ElementId, Point, Rect, Viewport};
pub use error::{Error, Result};
pub use init::{Bootstrap, InitReport, StepOutcome};
pub use motion::EasingType;
