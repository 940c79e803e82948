use crate::{FrameError, PackedFrame, RawFrame};

/// Converts a 3-plane YUV 4:2:0 frame to packed B,G,R at the target size.
///
/// The output is indexed row-major at `target_width` × `target_height`,
/// independent of the frame's own dimensions — the caller is expected to have
/// configured the source at (or near) the target resolution; no resampling
/// happens here. Chroma is read at half resolution in both axes through the
/// U plane's row/pixel strides, with the same index applied to the V plane.
///
/// Conversion uses fixed coefficients, truncated to integer and clamped:
/// - R = Y + 1.370705 * (V - 128)
/// - G = Y - 0.337633 * (U - 128) - 0.698001 * (V - 128)
/// - B = Y + 1.732446 * (U - 128)
///
/// Channels are written B, G, R — the order the recognition service decodes.
///
/// # Errors
///
/// Returns `FrameError::UnsupportedFormat` if the frame does not carry
/// exactly 3 planes, and `FrameError::PlaneTooSmall` if any plane buffer is
/// shorter than the highest index its strides imply for the target size.
pub fn convert_to_bgr(
    frame: &RawFrame<'_>,
    target_width: u32,
    target_height: u32,
) -> Result<PackedFrame, FrameError> {
    if frame.planes.len() != 3 {
        return Err(FrameError::UnsupportedFormat {
            planes: frame.planes.len(),
        });
    }

    let w = target_width as usize;
    let h = target_height as usize;

    if w == 0 || h == 0 {
        return Ok(PackedFrame {
            seq: 0,
            width: target_width,
            height: target_height,
            data: Vec::new(),
        });
    }

    let y = frame.planes[0];
    let u = frame.planes[1];
    let v = frame.planes[2];

    // Highest indices the loops below will touch.
    let y_required = (h - 1) * y.row_stride + w;
    let uv_required = ((h - 1) / 2) * u.row_stride + ((w - 1) / 2) * u.pixel_stride + 1;

    for (plane, len, required) in [
        (0, y.data.len(), y_required),
        (1, u.data.len(), uv_required),
        (2, v.data.len(), uv_required),
    ] {
        if len < required {
            return Err(FrameError::PlaneTooSmall {
                plane,
                len,
                required,
            });
        }
    }

    let mut data = Vec::with_capacity(w * h * 3);

    for j in 0..h {
        let y_row = j * y.row_stride;
        let uv_row = (j / 2) * u.row_stride;

        for i in 0..w {
            let luma = y.data[y_row + i] as f64;

            // 2x2 chroma subsampling: each U/V sample covers 4 luma pixels.
            let uv = uv_row + (i / 2) * u.pixel_stride;
            let cb = u.data[uv] as f64 - 128.0;
            let cr = v.data[uv] as f64 - 128.0;

            let r = luma + 1.370705 * cr;
            let g = luma - 0.337633 * cb - 0.698001 * cr;
            let b = luma + 1.732446 * cb;

            data.push(clamp_u8(b));
            data.push(clamp_u8(g));
            data.push(clamp_u8(r));
        }
    }

    Ok(PackedFrame {
        seq: 0,
        width: target_width,
        height: target_height,
        data,
    })
}

/// Truncate toward zero, then clamp to [0, 255] — the integer math the
/// receiving service assumes, not rounding.
fn clamp_u8(value: f64) -> u8 {
    (value as i32).clamp(0, 255) as u8
}
