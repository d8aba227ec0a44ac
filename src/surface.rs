//! External decode-surface and rendering-context views.
//!
//! Surfaces and contexts are owned by the surrounding driver; the bridge
//! only reads from them. A surface refers to its owning context by id, and
//! the context table is handed in by the caller on the readback path.

use crate::accel::{VideoMixer, VideoSurface};
use crate::heap::{ContextId, Heap};

/// An accelerator decode surface, as seen by the readback path.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub handle: VideoSurface,
    pub width: u32,
    pub height: u32,
    /// Owning rendering context; resolved only on the RGBA readback path.
    pub context: ContextId,
}

/// The slice of a rendering context the readback path needs: its mixer.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    pub mixer: VideoMixer,
}

/// Caller-owned table of live rendering contexts.
pub type ContextTable = Heap<RenderContext>;
