//! # accel-image
//!
//! Bridge between a generic, host-agnostic pixel-buffer abstraction
//! ("image") and a hardware video accelerator's native surface types.
//!
//! The bridge owns three jobs:
//!
//! - **Format negotiation** — a static bidirectional catalog between
//!   generic fourcc/mask descriptors and the accelerator's enumerated
//!   format codes, filtered at runtime by capability queries.
//! - **Layout planning** — per-format plane strides, offsets, and total
//!   buffer size, for packed and planar color formats (including the
//!   chroma-plane ordering quirk between the two planar 4:2:0 variants).
//! - **Readback** — full-surface extraction into an image's backing
//!   buffer: direct YCbCr bit reads for planar/packed YUV images, or a
//!   mixer conversion pass into a companion render surface followed by a
//!   native RGBA read.
//!
//! The accelerator itself, decode surfaces, and rendering contexts are
//! external collaborators reached through the [`Accelerator`] trait and the
//! [`Surface`]/[`RenderContext`] views; the bridge never allocates or frees
//! them.
//!
//! ## Non-Goals
//!
//! - Paletted/indexed image formats
//! - Partial-region readback (full-surface only)
//! - Uploading images into surfaces (put-image) and zero-copy surface
//!   aliasing (derive-image) — present in the API, deliberately
//!   unimplemented
//!
//! ## Usage
//!
//! ```no_run
//! use accel_image::{supported_formats, ImageBridge, Rect};
//! # struct Hw;
//! # impl accel_image::Accelerator for Hw {
//! #     fn query_ycbcr_caps(&self, _: accel_image::ChromaType, _: accel_image::YCbCrFormat) -> Result<bool, accel_image::NativeError> { Ok(true) }
//! #     fn query_rgba_caps(&self, _: accel_image::RgbaFormat) -> Result<bool, accel_image::NativeError> { Ok(true) }
//! #     fn create_output_surface(&mut self, _: accel_image::RgbaFormat, _: u32, _: u32) -> Result<accel_image::OutputSurface, accel_image::NativeError> { Ok(accel_image::OutputSurface(0)) }
//! #     fn destroy_output_surface(&mut self, _: accel_image::OutputSurface) -> Result<(), accel_image::NativeError> { Ok(()) }
//! #     fn video_surface_get_bits_ycbcr(&self, _: accel_image::VideoSurface, _: accel_image::YCbCrFormat, _: &mut [u8], _: &accel_image::PlaneMap) -> Result<(), accel_image::NativeError> { Ok(()) }
//! #     fn mixer_render(&mut self, _: accel_image::VideoMixer, _: accel_image::VideoSurface, _: Rect, _: accel_image::OutputSurface, _: Rect) -> Result<(), accel_image::NativeError> { Ok(()) }
//! #     fn output_surface_get_bits_native(&self, _: accel_image::OutputSurface, _: Rect, _: &mut [u8], _: &accel_image::PlaneMap) -> Result<(), accel_image::NativeError> { Ok(()) }
//! # }
//! # fn main() -> Result<(), accel_image::BridgeError> {
//! let mut hw = Hw;
//! let mut bridge = ImageBridge::new();
//!
//! // Negotiate a format the accelerator supports.
//! let formats = supported_formats(&hw);
//! let nv12 = formats[0];
//!
//! // Create an image and read a surface back into it.
//! let image_id = bridge.create_image(&mut hw, &nv12, 1920, 1080)?;
//! # let surface: accel_image::Surface = todo!();
//! # let contexts: accel_image::ContextTable = todo!();
//! bridge.get_image(&mut hw, &surface, &contexts, Rect::new(0, 0, 1920, 1080), image_id)?;
//! let pixels = bridge.image(image_id).and_then(|img| bridge.buffer(img.buffer?));
//! bridge.destroy_image(&mut hw, image_id)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod accel;
mod error;
mod format;
mod heap;
mod image;
mod layout;
mod readback;
mod surface;

// Re-exports
pub use accel::{
    Accelerator, ChromaType, NativeError, OutputSurface, PlaneMap, Rect, VideoMixer, VideoSurface,
};
pub use error::BridgeError;
pub use format::{
    chroma_swapped, describe, rgba_format, supported_format_count, supported_formats,
    ycbcr_format, ByteOrder, FormatClass, FourCc, ImageFormat, NativeFormat, RgbaFormat,
    YCbCrFormat, MAX_IMAGE_FORMATS,
};
pub use heap::{BufferId, ContextId, Heap, ImageId};
pub use image::{Companion, Image, ImageBridge, SubpictureId};
pub use layout::{PlaneLayout, MAX_PLANES};
pub use surface::{ContextTable, RenderContext, Surface};
