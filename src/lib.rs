//! melange - desktop widget shell core
//!
//! - core: geometry and layer input primitives
//! - kernel: compositing layer, widget registry, overlay, shell
//! - kernel::services: ports (toolkit/engine contracts) and adapters
//!   (headless host, manifest scanner, settings IO, content server)

pub mod core;
pub mod kernel;
