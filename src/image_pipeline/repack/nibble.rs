//! Nibble repacking kernels.
//!
//! STB frames carry 12-bit-significant samples in the low bits of each u16
//! word. The NV layout wants them in the high nibble positions, so the
//! kernels here shift each sample left by 4 bits. `NvStandard` additionally
//! folds bits 8-11 back into the vacated low nibble for the active-pixel
//! rows, while the metadata rows at the top and bottom of the frame stay in
//! the plain zero-padded form.
//!
//! All kernels are pure: they borrow the input frame and produce a new,
//! independent frame. Arithmetic stays within u16 width.

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::repack::types::TransformKind;
use crate::image_pipeline::stb::types::PixelFrame;

/// Leading metadata rows excluded from the nibble merge.
const FRONT_BAND_ROWS: usize = 1;

/// Trailing metadata rows excluded from the nibble merge.
const REAR_BAND_ROWS: usize = 20;

/// Applies the selected repacking transform to a decoded frame.
pub fn apply(frame: &PixelFrame, kind: TransformKind) -> Result<PixelFrame> {
    match kind {
        TransformKind::Raw => Ok(frame.clone()),
        TransformKind::NvZeroPad => Ok(shift_zero_pad(frame)),
        TransformKind::NvStandard => shift_standard(frame),
    }
}

/// Shifts a sample into the high nibble positions, zero-filling the low
/// nibble. The four high bits shifted out are discarded, matching the
/// fixed-width semantics of the container format.
#[inline]
fn pack_zero_pad(sample: u16) -> u16 {
    sample << 4
}

/// Shifts a sample and merges its original bits 8-11 into the low nibble.
/// The addend is at most 0xF and the shifted value has a zero low nibble,
/// so the sum cannot overflow.
#[inline]
fn pack_merge(sample: u16) -> u16 {
    (sample << 4) + ((sample & 0x0F00) >> 8)
}

fn shift_zero_pad(frame: &PixelFrame) -> PixelFrame {
    PixelFrame {
        width: frame.width,
        height: frame.height,
        data: frame.data.iter().map(|&s| pack_zero_pad(s)).collect(),
    }
}

/// Region-aware repacking: the first row and the last [`REAR_BAND_ROWS`]
/// rows get the zero-padded shift, every row between them gets the nibble
/// merge. Bands are copied over explicit index ranges of the row-major
/// buffer and concatenated in order, so row count and order are preserved.
fn shift_standard(frame: &PixelFrame) -> Result<PixelFrame> {
    let width = frame.width;
    let height = frame.height;

    if height <= REAR_BAND_ROWS {
        return Err(ConversionError::InvalidDimensions(width, height));
    }

    let front_end = FRONT_BAND_ROWS * width;
    let middle_end = (height - REAR_BAND_ROWS) * width;

    let mut data = Vec::with_capacity(frame.data.len());
    data.extend(frame.data[..front_end].iter().map(|&s| pack_zero_pad(s)));
    data.extend(frame.data[front_end..middle_end].iter().map(|&s| pack_merge(s)));
    data.extend(frame.data[middle_end..].iter().map(|&s| pack_zero_pad(s)));

    Ok(PixelFrame {
        width,
        height,
        data,
    })
}
