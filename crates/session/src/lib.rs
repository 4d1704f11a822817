//! Session logic for the soft-follow map: which lens is active, when the
//! view recenters on the user, and when the status line speaks.
//!
//! Everything here is host-agnostic. The map widget, the status element, the
//! location feed and the overlay fetch are reached through small traits so
//! the same [`Session`] runs under the browser binding and under tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod follow;
pub mod intro;
pub mod lens;
pub mod overlay_loader;
pub mod position;
pub mod speak;
pub mod status;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use event::*;
pub use follow::*;
pub use intro::*;
pub use lens::*;
pub use overlay_loader::*;
pub use position::*;
pub use speak::*;
pub use status::*;
pub use view::*;
