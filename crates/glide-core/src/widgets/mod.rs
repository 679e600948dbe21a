//! Page widgets
//!
//! Each widget is a plain state machine. Browser events go in, and a view or
//! tween request comes out for the host to apply.

pub mod carousel;
pub mod counter;
pub mod cursor;
pub mod form;
pub mod header;
pub mod lazy;
pub mod loading;
pub mod magnetic;
pub mod menu;
pub mod parallax;
pub mod progress;

pub use carousel::Carousel;
pub use counter::{Counter, CounterFrame};
pub use cursor::{CursorView, CustomCursor};
pub use form::{Field, FormState, FormValidator, SubmitOutcome};
pub use header::{HeaderState, HeaderView, ScrollDirection};
pub use lazy::{LazyLoader, LoadRequest};
pub use loading::{LoadingPhase, LoadingScreen};
pub use magnetic::{hover_lift, MagneticButton};
pub use menu::{MenuState, MenuTransition, MenuView, MobileMenu};
pub use parallax::parallax_offset;
pub use progress::{back_to_top_visible, progress_percent};
