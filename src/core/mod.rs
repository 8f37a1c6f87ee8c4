//! Geometry and raw input shared by the kernel and the host adapters.

pub mod event;
pub mod geom;

pub use event::{LayerInput, MouseButton};
pub use geom::{clamp_to_screen, Pos, Rect, Size};
