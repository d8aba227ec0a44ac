//! Image format descriptors and the static format catalog.
//!
//! The catalog is the bidirectional translation table between the generic
//! fourcc/mask-based format description and the accelerator's enumerated
//! format codes. It is a plain `const` array; the uniqueness invariants
//! (one native code per (class, fourcc) for YCbCr, full mask-set uniqueness
//! for RGBA) are validated by the tests at the bottom of this module.

use alloc::vec::Vec;

use crate::accel::{Accelerator, ChromaType};

/// Four-character code identifying a packed or planar pixel layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Semi-planar 4:2:0, luma plane plus interleaved chroma plane.
    pub const NV12: FourCc = FourCc(*b"NV12");
    /// Fully planar 4:2:0 with chroma planes in Y/V/U order.
    pub const YV12: FourCc = FourCc(*b"YV12");
    /// Packed 4:2:2, U Y0 V Y1 byte order.
    pub const UYVY: FourCc = FourCc(*b"UYVY");
    /// Packed 4:2:2, Y0 U Y1 V byte order.
    pub const YUYV: FourCc = FourCc(*b"YUYV");
    /// Packed 4:4:4 with alpha.
    pub const AYUV: FourCc = FourCc(*b"AYUV");
    /// 32-bit RGBA; channel ordering is carried by the masks, not the fourcc.
    pub const RGBA: FourCc = FourCc(*b"RGBA");
}

impl core::fmt::Debug for FourCc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '.' };
            core::fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl core::fmt::Display for FourCc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// Byte order of a generic format descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    LsbFirst,
    MsbFirst,
}

/// Broad class of an image format, selecting which capability query applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatClass {
    YCbCr,
    Rgba,
    /// Paletted formats. Present for interface completeness; the catalog
    /// carries no Indexed entries and none are ever advertised.
    Indexed,
}

/// Accelerator-native YCbCr format code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YCbCrFormat {
    Nv12,
    Yv12,
    Uyvy,
    Yuyv,
    V8U8Y8A8,
}

/// Accelerator-native RGBA render-surface format code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RgbaFormat {
    B8G8R8A8,
    R8G8B8A8,
}

/// Native format code together with its class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeFormat {
    YCbCr(YCbCrFormat),
    Rgba(RgbaFormat),
}

impl NativeFormat {
    pub fn class(&self) -> FormatClass {
        match self {
            NativeFormat::YCbCr(_) => FormatClass::YCbCr,
            NativeFormat::Rgba(_) => FormatClass::Rgba,
        }
    }
}

/// Generic (host-agnostic) image format descriptor.
///
/// For YCbCr formats the depth and channel masks are zero; for RGBA formats
/// the masks disambiguate channel ordering, since multiple RGBA layouts share
/// the `RGBA` fourcc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageFormat {
    pub fourcc: FourCc,
    pub byte_order: ByteOrder,
    pub bits_per_pixel: u32,
    pub depth: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
}

impl ImageFormat {
    const fn ycbcr(fourcc: FourCc, bits_per_pixel: u32) -> Self {
        ImageFormat {
            fourcc,
            byte_order: ByteOrder::LsbFirst,
            bits_per_pixel,
            depth: 0,
            red_mask: 0,
            green_mask: 0,
            blue_mask: 0,
            alpha_mask: 0,
        }
    }

    const fn rgba(
        byte_order: ByteOrder,
        depth: u32,
        red_mask: u32,
        green_mask: u32,
        blue_mask: u32,
        alpha_mask: u32,
    ) -> Self {
        ImageFormat {
            fourcc: FourCc::RGBA,
            byte_order,
            bits_per_pixel: 32,
            depth,
            red_mask,
            green_mask,
            blue_mask,
            alpha_mask,
        }
    }
}

pub(crate) struct CatalogEntry {
    pub native: NativeFormat,
    pub format: ImageFormat,
    /// The native surface emits chroma planes in the opposite order from
    /// what this fourcc's generic layout expects (YV12 only).
    pub chroma_swapped: bool,
}

impl CatalogEntry {
    const fn ycbcr(native: YCbCrFormat, fourcc: FourCc, bpp: u32, chroma_swapped: bool) -> Self {
        CatalogEntry {
            native: NativeFormat::YCbCr(native),
            format: ImageFormat::ycbcr(fourcc, bpp),
            chroma_swapped,
        }
    }

    const fn rgba(native: RgbaFormat, r: u32, g: u32, b: u32, a: u32) -> Self {
        #[cfg(target_endian = "big")]
        let byte_order = ByteOrder::MsbFirst;
        #[cfg(target_endian = "little")]
        let byte_order = ByteOrder::LsbFirst;
        CatalogEntry {
            native: NativeFormat::Rgba(native),
            format: ImageFormat::rgba(byte_order, 32, r, g, b, a),
            chroma_swapped: false,
        }
    }
}

pub(crate) const CATALOG: &[CatalogEntry] = &[
    CatalogEntry::ycbcr(YCbCrFormat::Nv12, FourCc::NV12, 12, false),
    CatalogEntry::ycbcr(YCbCrFormat::Yv12, FourCc::YV12, 12, true),
    CatalogEntry::ycbcr(YCbCrFormat::Uyvy, FourCc::UYVY, 16, false),
    CatalogEntry::ycbcr(YCbCrFormat::Yuyv, FourCc::YUYV, 16, false),
    CatalogEntry::ycbcr(YCbCrFormat::V8U8Y8A8, FourCc::AYUV, 32, false),
    CatalogEntry::rgba(RgbaFormat::B8G8R8A8, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000),
    CatalogEntry::rgba(RgbaFormat::R8G8B8A8, 0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0xff00_0000),
];

/// Upper bound on the number of formats [`supported_formats`] can return.
///
/// Callers sizing a fixed output buffer may use this instead of a count
/// probe.
pub const MAX_IMAGE_FORMATS: usize = CATALOG.len();

/// Resolve the native YCbCr code for a generic descriptor.
///
/// YCbCr lookup matches on fourcc alone; within the class one native code
/// per fourcc is unique. Returns `None` for unsupported formats.
pub fn ycbcr_format(format: &ImageFormat) -> Option<YCbCrFormat> {
    CATALOG.iter().find_map(|entry| match entry.native {
        NativeFormat::YCbCr(code) if entry.format.fourcc == format.fourcc => Some(code),
        _ => None,
    })
}

/// Resolve the native RGBA code for a generic descriptor.
///
/// RGBA layouts share a fourcc, so the match requires byte order and the
/// R/G/B channel masks as well. Returns `None` for unsupported formats.
pub fn rgba_format(format: &ImageFormat) -> Option<RgbaFormat> {
    CATALOG.iter().find_map(|entry| match entry.native {
        NativeFormat::Rgba(code)
            if entry.format.fourcc == format.fourcc
                && entry.format.byte_order == format.byte_order
                && entry.format.red_mask == format.red_mask
                && entry.format.green_mask == format.green_mask
                && entry.format.blue_mask == format.blue_mask =>
        {
            Some(code)
        }
        _ => None,
    })
}

/// Reverse lookup: the generic descriptor for a native format code.
pub fn describe(native: NativeFormat) -> Option<&'static ImageFormat> {
    CATALOG
        .iter()
        .find(|entry| entry.native == native)
        .map(|entry| &entry.format)
}

/// Whether the native surface emits this fourcc's chroma planes in the
/// opposite order from the generic layout convention.
pub fn chroma_swapped(fourcc: FourCc) -> bool {
    CATALOG
        .iter()
        .any(|entry| entry.format.fourcc == fourcc && entry.chroma_swapped)
}

fn is_supported<A: Accelerator>(accel: &A, native: NativeFormat) -> bool {
    let caps = match native {
        NativeFormat::YCbCr(code) => accel.query_ycbcr_caps(ChromaType::Chroma420, code),
        NativeFormat::Rgba(code) => accel.query_rgba_caps(code),
    };
    caps.unwrap_or(false)
}

/// Enumerate the catalog entries the accelerator actually supports,
/// preserving catalog order.
pub fn supported_formats<A: Accelerator>(accel: &A) -> Vec<ImageFormat> {
    CATALOG
        .iter()
        .filter(|entry| is_supported(accel, entry.native))
        .map(|entry| entry.format)
        .collect()
}

/// Count probe: how many formats [`supported_formats`] would return for the
/// same accelerator state.
pub fn supported_format_count<A: Accelerator>(accel: &A) -> usize {
    CATALOG
        .iter()
        .filter(|entry| is_supported(accel, entry.native))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_codes_unique_per_class() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.native, b.native, "duplicate native code in catalog");
            }
        }
    }

    #[test]
    fn rgba_mask_sets_unique() {
        let rgba: Vec<&CatalogEntry> = CATALOG
            .iter()
            .filter(|e| matches!(e.native, NativeFormat::Rgba(_)))
            .collect();
        for (i, a) in rgba.iter().enumerate() {
            for b in &rgba[i + 1..] {
                let same = a.format.fourcc == b.format.fourcc
                    && a.format.byte_order == b.format.byte_order
                    && a.format.red_mask == b.format.red_mask
                    && a.format.green_mask == b.format.green_mask
                    && a.format.blue_mask == b.format.blue_mask
                    && a.format.alpha_mask == b.format.alpha_mask;
                assert!(!same, "ambiguous RGBA catalog entries");
            }
        }
    }

    #[test]
    fn ycbcr_roundtrip() {
        for entry in CATALOG {
            if let NativeFormat::YCbCr(code) = entry.native {
                assert_eq!(ycbcr_format(&entry.format), Some(code));
                assert_eq!(describe(entry.native), Some(&entry.format));
            }
        }
    }

    #[test]
    fn rgba_roundtrip_disambiguates_on_masks() {
        for entry in CATALOG {
            if let NativeFormat::Rgba(code) = entry.native {
                // Fourcc alone is ambiguous; the full descriptor is not.
                assert_eq!(rgba_format(&entry.format), Some(code));
                assert_eq!(describe(entry.native), Some(&entry.format));
            }
        }
    }

    #[test]
    fn rgba_lookup_rejects_foreign_masks() {
        let mut format = *describe(NativeFormat::Rgba(RgbaFormat::B8G8R8A8)).unwrap();
        format.red_mask = 0x0000_f800;
        format.green_mask = 0x0000_07e0;
        format.blue_mask = 0x0000_001f;
        assert_eq!(rgba_format(&format), None);
    }

    #[test]
    fn ycbcr_lookup_misses_unknown_fourcc() {
        let format = ImageFormat::ycbcr(FourCc(*b"I420"), 12);
        assert_eq!(ycbcr_format(&format), None);
    }

    #[test]
    fn only_yv12_is_chroma_swapped() {
        assert!(chroma_swapped(FourCc::YV12));
        assert!(!chroma_swapped(FourCc::NV12));
        assert!(!chroma_swapped(FourCc::UYVY));
        assert!(!chroma_swapped(FourCc::RGBA));
    }
}
