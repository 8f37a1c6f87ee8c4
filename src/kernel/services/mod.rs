//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the kernel talks to (toolkit, rendering engine,
//!   manifests, settings).
//! - `adapters`: headless and OS-facing implementations, plus the content
//!   server.

pub mod adapters;
pub mod ports;
