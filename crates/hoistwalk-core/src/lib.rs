//! Hoistwalk core - scope-aware rewriting of ESTree trees
//!
//! [`walk`] drives a sparse table of per-kind [`Transforms`] over a tree
//! and threads an [`Env`] through it. Every program, function and catch
//! clause gets a frame holding the names it declares, registered before
//! any of its statements is visited, so hoisted names are visible from the
//! top of their scope.
//!
//! The two extractors the walker relies on are public as well:
//! [`bound_names`] for binding patterns and [`fresh_names`] for the names a
//! scope body declares directly.

pub mod analysis;
pub mod bindings;
pub mod config;
pub mod env;
pub mod error;
pub mod hoist;
pub mod kind;
pub mod node;
pub mod walk;

pub use bindings::bound_names;
pub use env::Env;
pub use error::{TreeError, WalkError, WalkResult};
pub use hoist::fresh_names;
pub use kind::NodeKind;
pub use node::{Field, Node};
pub use walk::{Transforms, descend, walk, walk_slot};
