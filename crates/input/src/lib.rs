//! Actions: the closed set of moves an ant can make in one tick.
//!
//! # Invariants
//! - One action is applied to every ant in every colony each tick.
//! - Unknown integer codes map to [`Action::Noop`], never to an error.

pub mod action;

pub use action::Action;
