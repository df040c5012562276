//! Workspace tooling package; the code lives under `crates/`.
