//! DOM bindings for each widget
//!
//! Every `init` returns `MissingAnchor` when its markup is absent, which the
//! bootstrap treats as nothing to do.

pub mod carousel;
pub mod counter;
pub mod cursor;
pub mod form;
pub mod header;
pub mod lazy;
pub mod loading;
pub mod menu;
pub mod parallax;
pub mod pointer;
pub mod reveal;
pub mod scroll;
