//! The frame-source boundary: whatever captures raw pixels (an X11/XShm
//! screen grab, a video decoder, a test pattern generator) only needs to
//! hand this crate a [`Image`](crate::image::Image) through
//! [`FrameSource::grab_frame`]. The capture backend itself is out of
//! scope here; `qtrc-core` only defines the contract and the byte layout
//! a backend is expected to produce.

use crate::error::Result;
use crate::image::Image;

/// Something that can produce successive frames as BGRX-ordered pixels.
///
/// Implementors are expected to hand back 32-bit-per-pixel data in
/// byte order blue, green, red, pad — the layout an X11 `XShmGetImage`
/// call against a `TrueColor` visual produces, and the layout
/// [`Image::from_bgrx_le`] expects. A backend that already has pixels
/// in that shape can construct its `Image` with that helper; one that
/// doesn't is responsible for converting before returning.
pub trait FrameSource {
	/// Captures and returns the next available frame.
	///
	/// # Errors
	///
	/// Returns an error if the underlying capture mechanism fails (the
	/// display connection drops, the capture region is out of bounds,
	/// and so on).
	fn grab_frame(&mut self) -> Result<Image>;
}
