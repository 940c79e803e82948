/// Borrowed view over one plane of a planar frame.
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub row_stride: usize,
    pub pixel_stride: usize,
}

/// Borrowed view over a planar sensor frame.
///
/// Valid only for the duration of one source callback: nothing derived from
/// a `RawFrame` may keep borrowing after conversion returns.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub planes: &'a [Plane<'a>],
}

/// Owned plane buffer, for frame sources that hand over frame ownership.
#[derive(Clone, Debug)]
pub struct PlaneBuf {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

/// Owned planar frame, the pull-based counterpart of [`RawFrame`].
#[derive(Clone, Debug)]
pub struct PlanarFrame {
    pub width: u32,
    pub height: u32,
    pub planes: Vec<PlaneBuf>,
}

impl PlanarFrame {
    /// Build a YUV 4:2:0 frame with tight strides (luma rows `width` bytes,
    /// chroma rows `(width + 1) / 2` bytes, pixel stride 1 everywhere).
    pub fn yuv420(width: u32, height: u32, y: Vec<u8>, u: Vec<u8>, v: Vec<u8>) -> Self {
        let luma_stride = width as usize;
        let chroma_stride = (width as usize).div_ceil(2);
        PlanarFrame {
            width,
            height,
            planes: vec![
                PlaneBuf {
                    data: y,
                    row_stride: luma_stride,
                    pixel_stride: 1,
                },
                PlaneBuf {
                    data: u,
                    row_stride: chroma_stride,
                    pixel_stride: 1,
                },
                PlaneBuf {
                    data: v,
                    row_stride: chroma_stride,
                    pixel_stride: 1,
                },
            ],
        }
    }

    /// Borrowed plane views, for handing this frame to the converter.
    pub fn views(&self) -> Vec<Plane<'_>> {
        self.planes
            .iter()
            .map(|p| Plane {
                data: &p.data,
                row_stride: p.row_stride,
                pixel_stride: p.pixel_stride,
            })
            .collect()
    }
}

/// Packed three-channel frame, `width * height * 3` bytes interleaved B,G,R.
///
/// `seq` is a pipeline-assigned monotonic sequence number, carried for log
/// correlation; the recognition service does not echo it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFrame {
    pub seq: u64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PackedFrame {
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }
}
