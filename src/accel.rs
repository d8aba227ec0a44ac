//! The accelerator boundary: opaque native handles, the capability/readback
//! trait, and the native status codes translated at the crate edge.
//!
//! The bridge never allocates or frees decode surfaces and never drives the
//! mixer pipeline itself; everything it needs from the hardware goes through
//! [`Accelerator`], and every native status is translated to a
//! [`BridgeError`](crate::BridgeError) before reaching a caller.

use crate::format::{RgbaFormat, YCbCrFormat};
use crate::layout::{PlaneLayout, MAX_PLANES};

/// Accelerator-native decode surface handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoSurface(pub u32);

/// Accelerator-native render-target surface handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputSurface(pub u32);

/// Accelerator-native video mixer handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoMixer(pub u32);

/// Chroma subsampling class for surface capability queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChromaType {
    Chroma420,
}

/// Pixel rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }
}

/// Destination mapping for a bit-extraction call: per-plane offsets into a
/// single destination buffer, plus per-plane strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneMap {
    pub num_planes: usize,
    pub offsets: [usize; MAX_PLANES],
    pub pitches: [usize; MAX_PLANES],
}

impl PlaneMap {
    pub fn from_layout(layout: &PlaneLayout) -> Self {
        let mut map = PlaneMap {
            num_planes: layout.num_planes,
            offsets: [0; MAX_PLANES],
            pitches: [0; MAX_PLANES],
        };
        for i in 0..layout.num_planes {
            map.offsets[i] = layout.offsets[i] as usize;
            map.pitches[i] = layout.pitches[i] as usize;
        }
        map
    }

    /// Swap the destinations of planes 1 and 2.
    ///
    /// Used when the generic fourcc expects chroma in the opposite order
    /// from the fixed order the native surface emits.
    pub fn swap_chroma(&mut self) {
        self.offsets.swap(1, 2);
        self.pitches.swap(1, 2);
    }
}

/// Accelerator-native status codes.
///
/// These never cross the bridge boundary; see
/// [`BridgeError::from_native`](crate::BridgeError::from_native).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    #[error("invalid handle")]
    InvalidHandle,
    #[error("invalid size")]
    InvalidSize,
    #[error("invalid value")]
    InvalidValue,
    #[error("out of memory")]
    OutOfMemory,
    #[error("out of resources")]
    Resources,
    #[error("generic failure")]
    Error,
}

/// The hardware accelerator as seen by this bridge.
///
/// All calls are synchronous round-trips; there is no cancellation. The
/// bit-extraction calls write into `dst` through the offsets and strides in
/// `planes`, one destination region per source plane.
pub trait Accelerator {
    /// Does the accelerator support reading decode-surface bits in `format`
    /// for the given chroma class?
    fn query_ycbcr_caps(&self, chroma: ChromaType, format: YCbCrFormat)
        -> Result<bool, NativeError>;

    /// Does the accelerator support render surfaces in `format`?
    fn query_rgba_caps(&self, format: RgbaFormat) -> Result<bool, NativeError>;

    /// Create a render-target surface (companion surface for RGBA images).
    fn create_output_surface(
        &mut self,
        format: RgbaFormat,
        width: u32,
        height: u32,
    ) -> Result<OutputSurface, NativeError>;

    /// Destroy a render-target surface previously created here.
    fn destroy_output_surface(&mut self, surface: OutputSurface) -> Result<(), NativeError>;

    /// Read the decode surface's pixels as `format` into `dst`.
    fn video_surface_get_bits_ycbcr(
        &self,
        surface: VideoSurface,
        format: YCbCrFormat,
        dst: &mut [u8],
        planes: &PlaneMap,
    ) -> Result<(), NativeError>;

    /// Composite `source` into `target` over the given rectangles: frame
    /// picture structure, no background, no layers. A pure format and
    /// color-space conversion pass, no deinterlacing or scaling.
    fn mixer_render(
        &mut self,
        mixer: VideoMixer,
        source: VideoSurface,
        source_rect: Rect,
        target: OutputSurface,
        target_rect: Rect,
    ) -> Result<(), NativeError>;

    /// Read a render surface's pixels in its native RGBA layout into `dst`.
    fn output_surface_get_bits_native(
        &self,
        surface: OutputSurface,
        rect: Rect,
        dst: &mut [u8],
        planes: &PlaneMap,
    ) -> Result<(), NativeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FourCc;

    #[test]
    fn plane_map_mirrors_layout() {
        let layout = PlaneLayout::plan(FourCc::NV12, 8, 8).unwrap();
        let map = PlaneMap::from_layout(&layout);
        assert_eq!(map.num_planes, 2);
        assert_eq!(map.offsets[..2], [0, 64]);
        assert_eq!(map.pitches[..2], [8, 8]);
    }

    #[test]
    fn swap_chroma_exchanges_planes_1_and_2() {
        let layout = PlaneLayout::plan(FourCc::YV12, 4, 4).unwrap();
        let mut map = PlaneMap::from_layout(&layout);
        map.swap_chroma();
        assert_eq!(map.offsets, [0, 16, 20]);
        assert_eq!(map.pitches, [4, 2, 2]);
    }
}
