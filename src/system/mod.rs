//! # System Interaction Layer
//!
//! The boundary between the launcher and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: Prepares the child environment and spawns detached processes,
//!   with a `cmd /C` retry for Windows shims.
//! - **`activation`**: Best-effort "bring application to front" (`osascript` on macOS).

pub mod activation;
pub mod executor;
