//! Headless controller for a portal page: validates and submits its forms
//! to their data-collection endpoints, shows one transient notification at
//! a time, and runs the navigation panel with its focus trap.
//!
//! All UI mutation goes through the traits in [`view::port`], so the state
//! machines run the same against a page binding, the console driver or a
//! test recorder.

pub mod cli;
pub mod form;
pub mod nav;
pub mod notify;
pub mod submit;
pub mod trace;
pub mod view;
