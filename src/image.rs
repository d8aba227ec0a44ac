//! Image objects and their lifecycle: creation, destruction, and the
//! deliberately unimplemented parts of the contract surface.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::accel::{Accelerator, OutputSurface, Rect};
use crate::error::BridgeError;
use crate::format::{rgba_format, FourCc, ImageFormat};
use crate::heap::{BufferId, Heap, ImageId};
use crate::layout::{PlaneLayout, MAX_PLANES};
use crate::surface::Surface;

/// Optional hardware surface allocated alongside an image.
///
/// RGBA images carry a render surface that receives a compositing pass
/// before readback; YCbCr images read straight from the decode surface and
/// carry none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Companion {
    None,
    Render(OutputSurface),
}

/// A created image: generic descriptor, computed plane layout, backing
/// buffer, and optional companion surface.
///
/// Immutable after creation; torn down only through
/// [`ImageBridge::destroy_image`].
#[derive(Clone, Copy, Debug)]
pub struct Image {
    pub id: ImageId,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub layout: PlaneLayout,
    /// Backing buffer handle; `None` only transiently while construction is
    /// unwinding.
    pub buffer: Option<BufferId>,
    pub(crate) companion: Companion,
}

impl Image {
    /// The image's companion surface, if its native representation needs
    /// one.
    pub fn companion(&self) -> Companion {
        self.companion
    }
}

/// Identifier of a subpicture. Only appears in the unimplemented
/// subpicture contract surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubpictureId(pub u32);

/// The image side of the driver: owns the image slot table and the backing
/// byte buffers. No internal locking; the caller serializes access.
pub struct ImageBridge {
    pub(crate) images: Heap<Image>,
    pub(crate) buffers: Heap<Vec<u8>>,
}

const DEFAULT_CAPACITY: usize = 1024;

impl Default for ImageBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBridge {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, DEFAULT_CAPACITY)
    }

    /// Bridge with bounded image and buffer tables; exhaustion surfaces as
    /// [`BridgeError::AllocationFailed`].
    pub fn with_capacity(max_images: usize, max_buffers: usize) -> Self {
        ImageBridge {
            images: Heap::with_capacity(max_images),
            buffers: Heap::with_capacity(max_buffers),
        }
    }

    /// Create an image for `format` at `width`x`height`.
    ///
    /// Plans the plane layout, allocates the companion render surface for
    /// RGBA formats, and allocates a zeroed backing buffer of the planned
    /// size. Any failure after the slot is taken unwinds through the same
    /// teardown as [`destroy_image`](Self::destroy_image) and reports the
    /// original failure; nothing is left allocated.
    pub fn create_image<A: Accelerator>(
        &mut self,
        accel: &mut A,
        format: &ImageFormat,
        width: u32,
        height: u32,
    ) -> Result<ImageId, BridgeError> {
        let placeholder = Image {
            id: ImageId(0),
            format: *format,
            width,
            height,
            layout: PlaneLayout {
                num_planes: 0,
                pitches: [0; MAX_PLANES],
                offsets: [0; MAX_PLANES],
                data_size: 0,
            },
            buffer: None,
            companion: Companion::None,
        };
        let id = match self.images.allocate(placeholder) {
            Some(raw) => ImageId(raw),
            None => return Err(BridgeError::AllocationFailed("image table exhausted")),
        };
        if let Some(image) = self.images.get_mut(id.0) {
            image.id = id;
        }

        let layout = match PlaneLayout::plan(format.fourcc, width, height) {
            Some(layout) => layout,
            None => {
                debug!("create_image: no layout for fourcc {}", format.fourcc);
                return Err(self.unwind(
                    accel,
                    id,
                    BridgeError::OperationFailed("unsupported image format"),
                ));
            }
        };
        if let Some(image) = self.images.get_mut(id.0) {
            image.layout = layout;
        }

        if format.fourcc == FourCc::RGBA {
            let Some(code) = rgba_format(format) else {
                return Err(self.unwind(
                    accel,
                    id,
                    BridgeError::OperationFailed("unknown RGBA channel layout"),
                ));
            };
            let surface = match accel.create_output_surface(code, width, height) {
                Ok(surface) => surface,
                Err(err) => {
                    debug!("create_image: companion surface creation failed: {err}");
                    return Err(self.unwind(
                        accel,
                        id,
                        BridgeError::OperationFailed("companion surface creation failed"),
                    ));
                }
            };
            if let Some(image) = self.images.get_mut(id.0) {
                image.companion = Companion::Render(surface);
            }
        }

        let buffer = match self.buffers.allocate(vec![0u8; layout.data_size as usize]) {
            Some(raw) => BufferId(raw),
            None => {
                return Err(self.unwind(
                    accel,
                    id,
                    BridgeError::AllocationFailed("buffer table exhausted"),
                ));
            }
        };
        if let Some(image) = self.images.get_mut(id.0) {
            image.buffer = Some(buffer);
        }

        debug!(
            "create_image: {} {}x{} -> image {id}, {} plane(s), {} bytes",
            format.fourcc, width, height, layout.num_planes, layout.data_size
        );
        Ok(id)
    }

    /// Destroy an image: companion surface first, then the backing buffer,
    /// then the slot. Idempotent-safe; a second destroy of the same id
    /// fails with [`BridgeError::InvalidImage`] without touching anything.
    pub fn destroy_image<A: Accelerator>(
        &mut self,
        accel: &mut A,
        id: ImageId,
    ) -> Result<(), BridgeError> {
        debug!("destroy_image: image {id}");
        self.teardown(accel, id)
    }

    /// Shared teardown for destruction and creation unwinding. Frees
    /// whatever of the image has been populated; the returned status is the
    /// buffer-release status.
    fn teardown<A: Accelerator>(&mut self, accel: &mut A, id: ImageId) -> Result<(), BridgeError> {
        let image = match self.images.free(id.0) {
            Some(image) => image,
            None => return Err(BridgeError::InvalidImage(id)),
        };
        if let Companion::Render(surface) = image.companion {
            if let Err(err) = accel.destroy_output_surface(surface) {
                // Must not mask the overall status; log and keep going.
                debug!("destroy_image: companion surface teardown failed: {err}");
            }
        }
        match image.buffer {
            Some(buffer) => match self.buffers.free(buffer.0) {
                Some(_) => Ok(()),
                None => Err(BridgeError::InvalidBuffer(buffer)),
            },
            None => Err(BridgeError::InvalidImage(id)),
        }
    }

    /// Unwind a partially constructed image, preserving the original error.
    fn unwind<A: Accelerator>(
        &mut self,
        accel: &mut A,
        id: ImageId,
        err: BridgeError,
    ) -> BridgeError {
        let _ = self.teardown(accel, id);
        err
    }

    /// Read-only view of a created image.
    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id.0)
    }

    /// Read-only view of an image's backing buffer.
    pub fn buffer(&self, id: BufferId) -> Option<&[u8]> {
        self.buffers.get(id.0).map(Vec::as_slice)
    }

    /// Number of live images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    // ── Unimplemented contract surface ──────────────────────────────────
    //
    // Present so the interface is complete; each reports failure
    // deterministically and touches no state.

    /// Alias a surface as an image without copying. Not implemented.
    pub fn derive_image(&mut self, _surface: &Surface) -> Result<ImageId, BridgeError> {
        Err(BridgeError::OperationFailed("derive-image is not implemented"))
    }

    /// Load a palette for an indexed image. Not implemented; no paletted
    /// formats are supported.
    pub fn set_image_palette(
        &mut self,
        _image: ImageId,
        _palette: &[u8],
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("image palettes are not implemented"))
    }

    /// Upload image bits into a surface. Not implemented.
    pub fn put_image(
        &mut self,
        _surface: &Surface,
        _image: ImageId,
        _src: Rect,
        _dest_x: u32,
        _dest_y: u32,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("put-image is not implemented"))
    }

    /// Upload image bits with independent source and destination
    /// rectangles. Not implemented.
    pub fn put_image_full(
        &mut self,
        _surface: &Surface,
        _image: ImageId,
        _src: Rect,
        _dest: Rect,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("put-image is not implemented"))
    }

    /// Create a subpicture backed by an image. Not implemented.
    pub fn create_subpicture(&mut self, _image: ImageId) -> Result<SubpictureId, BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Destroy a subpicture. Not implemented.
    pub fn destroy_subpicture(&mut self, _subpicture: SubpictureId) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Change the image backing a subpicture. Not implemented.
    pub fn set_subpicture_image(
        &mut self,
        _subpicture: SubpictureId,
        _image: ImageId,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Set a subpicture's chroma-key range. Not implemented.
    pub fn set_subpicture_chroma_key(
        &mut self,
        _subpicture: SubpictureId,
        _min: u32,
        _max: u32,
        _mask: u32,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Set a subpicture's global alpha. Not implemented.
    pub fn set_subpicture_global_alpha(
        &mut self,
        _subpicture: SubpictureId,
        _alpha: f32,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Associate a subpicture with target surfaces. Not implemented.
    pub fn associate_subpicture(
        &mut self,
        _subpicture: SubpictureId,
        _targets: &[Surface],
        _src_x: u32,
        _src_y: u32,
        _dest: Rect,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Associate a subpicture with independent source and destination
    /// rectangles. Not implemented.
    pub fn associate_subpicture_full(
        &mut self,
        _subpicture: SubpictureId,
        _targets: &[Surface],
        _src: Rect,
        _dest: Rect,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }

    /// Break a subpicture association. Not implemented.
    pub fn deassociate_subpicture(
        &mut self,
        _subpicture: SubpictureId,
        _targets: &[Surface],
    ) -> Result<(), BridgeError> {
        Err(BridgeError::OperationFailed("subpictures are not implemented"))
    }
}
