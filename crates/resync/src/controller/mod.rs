//! Resync controller
//!
//! One controller backs one open resync dialog. It owns the URL override
//! input, drives the remote call, and exposes a [`ResyncView`] snapshot
//! for the host to render.

mod input;
mod invoker;
mod view;

pub use input::OverrideInput;
pub use invoker::{Attempt, ControllerDeps, ResyncController, ResyncSignal};
pub use view::ResyncView;
