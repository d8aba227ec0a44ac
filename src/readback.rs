//! Surface-to-image readback.
//!
//! YCbCr images read straight out of the decode surface. RGBA images first
//! run one mixer pass (format/color-space conversion only) into the image's
//! companion render surface, then read that surface's native bits. Only
//! full-surface extraction is supported.

use log::{debug, trace};

use crate::accel::{Accelerator, PlaneMap, Rect};
use crate::error::BridgeError;
use crate::format::{chroma_swapped, rgba_format, ycbcr_format};
use crate::heap::ImageId;
use crate::image::{Companion, ImageBridge};
use crate::surface::{ContextTable, Surface};

impl ImageBridge {
    /// Read the full extent of `surface` into the image's backing buffer.
    ///
    /// `rect` must equal the full surface extent; partial-region readback
    /// is a deliberate scope limitation and fails with
    /// [`BridgeError::InvalidParameter`]. On success the backing buffer
    /// holds freshly read pixel data laid out per the image's plane layout.
    pub fn get_image<A: Accelerator>(
        &mut self,
        accel: &mut A,
        surface: &Surface,
        contexts: &ContextTable,
        rect: Rect,
        image_id: ImageId,
    ) -> Result<(), BridgeError> {
        let full_surface = rect.x == 0
            && rect.y == 0
            && rect.width == surface.width
            && rect.height == surface.height;
        if !full_surface {
            return Err(BridgeError::InvalidParameter(
                "only full-surface readback is supported",
            ));
        }

        let image = self
            .images
            .get(image_id.0)
            .ok_or(BridgeError::InvalidImage(image_id))?;
        let format = image.format;
        let layout = image.layout;
        let companion = image.companion;
        let Some(buffer_id) = image.buffer else {
            return Err(BridgeError::InvalidImage(image_id));
        };
        let dst = self
            .buffers
            .get_mut(buffer_id.0)
            .ok_or(BridgeError::InvalidBuffer(buffer_id))?;

        debug!(
            "get_image: surface {:?} {}x{} -> image {image_id} ({})",
            surface.handle, surface.width, surface.height, format.fourcc
        );

        match companion {
            Companion::None => {
                let code = ycbcr_format(&format)
                    .ok_or(BridgeError::OperationFailed("unresolvable YCbCr format"))?;
                let mut planes = PlaneMap::from_layout(&layout);
                if chroma_swapped(format.fourcc) {
                    // The decode surface emits chroma planes in its own
                    // fixed order; remap the destinations so the generic
                    // layout receives them where it expects them.
                    trace!("get_image: remapping swapped chroma planes for {}", format.fourcc);
                    planes.swap_chroma();
                }
                accel
                    .video_surface_get_bits_ycbcr(surface.handle, code, dst, &planes)
                    .map_err(BridgeError::from_native)
            }
            Companion::Render(target) => {
                rgba_format(&format)
                    .ok_or(BridgeError::OperationFailed("unresolvable RGBA format"))?;
                let context = contexts
                    .get(surface.context.0)
                    .ok_or(BridgeError::InvalidContext(surface.context))?;
                // One conversion pass into the companion surface, then a
                // plain bit extraction from it.
                accel
                    .mixer_render(context.mixer, surface.handle, rect, target, rect)
                    .map_err(BridgeError::from_native)?;
                let planes = PlaneMap::from_layout(&layout);
                accel
                    .output_surface_get_bits_native(target, rect, dst, &planes)
                    .map_err(BridgeError::from_native)
            }
        }
    }
}
