//! Plane layout planning: strides, offsets, and total buffer size per format.

use crate::format::FourCc;

/// Maximum number of planes any supported format uses.
pub const MAX_PLANES: usize = 3;

/// Computed memory layout of an image's backing buffer.
///
/// Only the first `num_planes` entries of `pitches`/`offsets` are
/// meaningful; the rest are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    pub num_planes: usize,
    pub pitches: [u32; MAX_PLANES],
    pub offsets: [u32; MAX_PLANES],
    pub data_size: u32,
}

impl PlaneLayout {
    /// Plan the buffer layout for `fourcc` at the given dimensions.
    ///
    /// Pure computation; returns `None` for fourccs this bridge cannot lay
    /// out (including catalog entries with no layout rule, like AYUV) and
    /// for dimensions whose buffer would not fit in a `u32`.
    ///
    /// Chroma dimensions round up, so odd sizes get a full extra chroma
    /// row/column.
    pub fn plan(fourcc: FourCc, width: u32, height: u32) -> Option<PlaneLayout> {
        // Widen before multiplying; every offset is bounded by data_size,
        // so one fit check covers the narrowing casts below.
        let size = u64::from(width) * u64::from(height);
        let width2 = width.div_ceil(2);
        let height2 = height.div_ceil(2);
        let size2 = u64::from(width2) * u64::from(height2);

        match fourcc {
            // Luma plane, then interleaved CbCr at luma pitch.
            FourCc::NV12 => {
                let data_size = u32::try_from(size + 2 * size2).ok()?;
                Some(PlaneLayout {
                    num_planes: 2,
                    pitches: [width, width, 0],
                    offsets: [0, size as u32, 0],
                    data_size,
                })
            }
            // The native surface orders the chroma planes opposite to the
            // generic YV12 convention, hence plane 2 sitting below plane 1.
            FourCc::YV12 => {
                let data_size = u32::try_from(size + 2 * size2).ok()?;
                Some(PlaneLayout {
                    num_planes: 3,
                    pitches: [width, width2, width2],
                    offsets: [0, (size + size2) as u32, size as u32],
                    data_size,
                })
            }
            // Single packed plane. The 4 bytes/pixel pitch over-allocates
            // for the 16-bpp 4:2:2 formats; kept to match the accelerator's
            // readback expectations.
            FourCc::RGBA | FourCc::UYVY | FourCc::YUYV => {
                let pitch = u32::try_from(u64::from(width) * 4).ok()?;
                let data_size = u32::try_from(u64::from(pitch) * u64::from(height)).ok()?;
                Some(PlaneLayout {
                    num_planes: 1,
                    pitches: [pitch, 0, 0],
                    offsets: [0, 0, 0],
                    data_size,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FourCc;

    #[test]
    fn nv12_1080p() {
        let layout = PlaneLayout::plan(FourCc::NV12, 1920, 1080).unwrap();
        assert_eq!(layout.num_planes, 2);
        assert_eq!(layout.pitches[0], 1920);
        assert_eq!(layout.pitches[1], 1920);
        assert_eq!(layout.offsets[0], 0);
        assert_eq!(layout.offsets[1], 2_073_600);
        assert_eq!(layout.data_size, 1920 * 1080 + 2 * (960 * 540));
        assert_eq!(layout.data_size, 3_110_400);
    }

    #[test]
    fn nv12_odd_dimensions_round_chroma_up() {
        let layout = PlaneLayout::plan(FourCc::NV12, 3, 3).unwrap();
        // size = 9, size2 = 2*2 = 4
        assert_eq!(layout.offsets[1], 9);
        assert_eq!(layout.data_size, 9 + 2 * 4);
    }

    #[test]
    fn yv12_chroma_planes_sit_in_native_order() {
        let layout = PlaneLayout::plan(FourCc::YV12, 4, 4).unwrap();
        assert_eq!(layout.num_planes, 3);
        assert_eq!(layout.pitches, [4, 2, 2]);
        // Plane 1 lands after plane 2 in memory: the native chroma order is
        // the reverse of the generic YV12 convention.
        assert_eq!(layout.offsets[1], 20);
        assert_eq!(layout.offsets[2], 16);
        assert_eq!(layout.data_size, 24);
    }

    #[test]
    fn rgba_packed() {
        let layout = PlaneLayout::plan(FourCc::RGBA, 2, 1).unwrap();
        assert_eq!(layout.num_planes, 1);
        assert_eq!(layout.pitches[0], 8);
        assert_eq!(layout.offsets[0], 0);
        assert_eq!(layout.data_size, 8);
    }

    #[test]
    fn packed_422_uses_rgba_pitch() {
        // UYVY/YUYV are 16 bpp, so width*4 over-allocates by 2x. This
        // mirrors the accelerator's observed layout; if it ever looks like
        // a bug upstream, it is one we deliberately reproduce.
        for fourcc in [FourCc::UYVY, FourCc::YUYV] {
            let layout = PlaneLayout::plan(fourcc, 8, 2).unwrap();
            assert_eq!(layout.num_planes, 1);
            assert_eq!(layout.pitches[0], 32);
            assert_eq!(layout.data_size, 64);
        }
    }

    #[test]
    fn oversize_dimensions_are_unsupported() {
        // 65536x65536 would need a >4GiB buffer; the plan must refuse
        // rather than wrap and undersize the allocation.
        assert_eq!(PlaneLayout::plan(FourCc::NV12, 1 << 16, 1 << 16), None);
        assert_eq!(PlaneLayout::plan(FourCc::YV12, 1 << 16, 1 << 16), None);
        assert_eq!(PlaneLayout::plan(FourCc::RGBA, 1 << 16, 1 << 16), None);
        assert_eq!(PlaneLayout::plan(FourCc::RGBA, 1 << 30, 1), None);

        // Just inside the representable range still plans.
        let layout = PlaneLayout::plan(FourCc::NV12, 1 << 15, 1 << 15).unwrap();
        assert_eq!(layout.data_size, (1u32 << 30) + (1u32 << 29));
    }

    #[test]
    fn ayuv_has_no_layout() {
        // In the catalog for enumeration, but create_image rejects it.
        assert_eq!(PlaneLayout::plan(FourCc::AYUV, 16, 16), None);
    }

    #[test]
    fn unknown_fourcc_unsupported() {
        assert_eq!(PlaneLayout::plan(FourCc(*b"I420"), 16, 16), None);
    }
}
