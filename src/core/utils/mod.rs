//! Shared utility macros. Declared first so the macros are visible crate-wide.

#[macro_use]
mod logging;
