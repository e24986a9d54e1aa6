// Library crate: the fitting engine and its headless surfaces (harness,
// command protocol) for integration tests. The egui application lives in the
// binary crate.

pub mod build;
pub mod builder;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod interaction;
pub mod snap;
pub mod state;
pub mod validation;

/// Mesh data and ground picking shared with the binary's viewport.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
