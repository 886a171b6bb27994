// SPDX-License-Identifier: GPL-3.0-only

//! Texture creation, strided uploads and quad drawing

use super::api::Gl;
use crate::constants::*;
use crate::errors::{GlError, GlResult};
use crate::media::PixelFormat;
use crate::media::formats::{bytes_per_pixel, map_format};
use image::DynamicImage;
use image::codecs::pnm::{PnmDecoder, PnmSubtype, SampleEncoding};
use std::io::Cursor;
use tracing::{debug, error};

/// Unpack alignment for rows `stride` bytes apart
///
/// The largest of 8, 4, 2, 1 dividing `stride`.
pub fn alignment_for(stride: usize) -> i32 {
    if stride % 8 == 0 {
        8
    } else if stride % 4 == 0 {
        4
    } else if stride % 2 == 0 {
        2
    } else {
        1
    }
}

/// Set the unpack alignment for rows `stride` bytes apart
pub fn set_alignment(gl: &dyn Gl, stride: usize) {
    gl.pixel_store_i(GL_UNPACK_ALIGNMENT, alignment_for(stride));
}

/// Upload a `w`x`h` sub-rectangle at (`x`, `y`)
///
/// `data` starts at the lowest-addressed row. A negative `stride` marks rows
/// stored bottom-to-top; the bytes are uploaded from the lowest address with
/// the stride magnitude either way. With `slice_height > 0` the upload is
/// split into strips of that many rows.
#[allow(clippy::too_many_arguments)]
pub fn upload_region(
    gl: &dyn Gl,
    target: GLenum,
    format: GLenum,
    ty: GLenum,
    data: &[u8],
    stride: isize,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    slice_height: i32,
) -> GlResult<()> {
    if w <= 0 || h <= 0 {
        return Ok(());
    }
    let bpp = bytes_per_pixel(format, ty).ok_or_else(|| {
        GlError::InvalidParameter(format!(
            "unknown bytes per pixel for format {:#x} type {:#x}",
            format, ty
        ))
    })? as usize;

    let stride = stride.unsigned_abs();
    let row_bytes = w as usize * bpp;
    if stride < row_bytes {
        return Err(GlError::InvalidParameter(format!(
            "stride {} shorter than a {} byte row",
            stride, row_bytes
        )));
    }
    let needed = (h as usize - 1) * stride + row_bytes;
    if data.len() < needed {
        return Err(GlError::InvalidParameter(format!(
            "upload needs {} bytes, got {}",
            needed,
            data.len()
        )));
    }

    let slice = if slice_height <= 0 { h } else { slice_height };
    set_alignment(gl, stride);
    gl.pixel_store_i(GL_UNPACK_ROW_LENGTH, (stride / bpp) as i32);

    let mut row = 0;
    while row < h {
        let rows = slice.min(h - row);
        let start = row as usize * stride;
        let end = start + (rows as usize - 1) * stride + row_bytes;
        gl.tex_sub_image_2d(target, x, y + row, w, rows, format, ty, &data[start..end]);
        row += rows;
    }
    Ok(())
}

/// Upload a whole `w`x`h` frame of `format` at the texture origin
///
/// Formats without a native texture layout are rejected; YV12 uploads its
/// luma plane.
#[allow(clippy::too_many_arguments)]
pub fn upload_frame(
    gl: &dyn Gl,
    target: GLenum,
    format: PixelFormat,
    data: &[u8],
    stride: isize,
    w: i32,
    h: i32,
    slice_height: i32,
) -> GlResult<()> {
    let desc = map_format(format);
    if !desc.supported && desc.format != GL_LUMINANCE {
        error!(%format, "No texture layout for pixel format");
        return Err(GlError::InvalidParameter(format!(
            "cannot upload {} frames",
            format
        )));
    }
    debug!(%format, w, h, slice_height, "Uploading frame");
    upload_region(
        gl,
        target,
        desc.format,
        desc.ty,
        data,
        stride,
        0,
        0,
        w,
        h,
        slice_height,
    )
}

/// Allocate a `w`x`h` texture filled with `value`
///
/// Uses clamp-to-edge wrapping with a matching border colour.
pub fn create_clear_texture(
    gl: &dyn Gl,
    target: GLenum,
    internal_format: GLenum,
    filter: GLenum,
    w: i32,
    h: i32,
    value: u8,
) -> GlResult<()> {
    if w <= 0 || h <= 0 {
        return Err(GlError::InvalidParameter(format!(
            "clear texture of size {}x{}",
            w, h
        )));
    }
    let fill = value as f32 / 255.0;
    let clear_format = if internal_format == GL_ALPHA {
        GL_ALPHA
    } else {
        GL_LUMINANCE
    };
    let init = vec![value; w as usize * h as usize];

    set_alignment(gl, w as usize);
    gl.pixel_store_i(GL_UNPACK_ROW_LENGTH, w);
    gl.tex_image_2d(
        target,
        internal_format,
        w,
        h,
        clear_format,
        GL_UNSIGNED_BYTE,
        &init,
    );
    gl.tex_parameter_f(target, GL_TEXTURE_PRIORITY, 1.0);
    gl.tex_parameter_i(target, GL_TEXTURE_MIN_FILTER, filter as i32);
    gl.tex_parameter_i(target, GL_TEXTURE_MAG_FILTER, filter as i32);
    gl.tex_parameter_i(target, GL_TEXTURE_WRAP_S, GL_CLAMP_TO_EDGE as i32);
    gl.tex_parameter_i(target, GL_TEXTURE_WRAP_T, GL_CLAMP_TO_EDGE as i32);
    // Unused with CLAMP_TO_EDGE, set anyway
    gl.tex_parameter_fv(target, GL_TEXTURE_BORDER_COLOR, &[fill; 4]);
    Ok(())
}

/// Header values of an uploaded PPM image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmInfo {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
}

/// Create a texture from binary PPM (P6) bytes
pub fn create_ppm_texture(
    gl: &dyn Gl,
    target: GLenum,
    internal_format: GLenum,
    filter: GLenum,
    bytes: &[u8],
) -> GlResult<PpmInfo> {
    let (_, header) = PnmDecoder::new(Cursor::new(bytes))?.into_inner();
    if header.subtype() != PnmSubtype::Pixmap(SampleEncoding::Binary) {
        return Err(GlError::Image(format!(
            "expected binary PPM (P6), got {:?}",
            header.subtype()
        )));
    }
    let info = PpmInfo {
        width: header.width(),
        height: header.height(),
        maxval: header.maximal_sample(),
    };
    if info.width > MAX_IMAGE_DIM || info.height > MAX_IMAGE_DIM {
        error!(
            width = info.width,
            height = info.height,
            "PPM image exceeds maximum texture dimension"
        );
        return Err(GlError::Image(format!(
            "{}x{} exceeds {}",
            info.width, info.height, MAX_IMAGE_DIM
        )));
    }

    let decoder = PnmDecoder::new(Cursor::new(bytes))?;
    let pixels = DynamicImage::from_decoder(decoder)?.into_rgb8();
    let (w, h) = (info.width as i32, info.height as i32);

    create_clear_texture(gl, target, internal_format, filter, w, h, 0)?;
    upload_region(
        gl,
        target,
        GL_RGB,
        GL_UNSIGNED_BYTE,
        pixels.as_raw(),
        w as isize * 3,
        0,
        0,
        w,
        h,
        0,
    )?;
    debug!(
        width = info.width,
        height = info.height,
        maxval = info.maxval,
        "PPM texture created"
    );
    Ok(info)
}

/// Rectangle in screen or texture pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl TextureRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Draw one textured quad
///
/// `tex` is in texture pixels; `tex_size` is the full texture size and
/// normalises coordinates unless `rect_tex` is set. With `planar` the chroma
/// units 1 and 2 get half-resolution coordinates (rectangle textures) or the
/// same normalised ones.
pub fn draw_texture(
    gl: &dyn Gl,
    screen: TextureRect,
    tex: TextureRect,
    tex_size: (u32, u32),
    rect_tex: bool,
    planar: bool,
    flip: bool,
) {
    let mut t = tex;
    let mut c = TextureRect::new(tex.x / 2.0, tex.y / 2.0, tex.w / 2.0, tex.h / 2.0);
    if !rect_tex {
        let (sx, sy) = (tex_size.0.max(1) as f32, tex_size.1.max(1) as f32);
        t = TextureRect::new(tex.x / sx, tex.y / sy, tex.w / sx, tex.h / sy);
        c = t;
    }
    let mut s = screen;
    if flip {
        s.y += s.h;
        s.h = -s.h;
    }

    let corners = [
        (t.x, t.y, c.x, c.y, s.x, s.y),
        (t.x, t.y + t.h, c.x, c.y + c.h, s.x, s.y + s.h),
        (t.x + t.w, t.y + t.h, c.x + c.w, c.y + c.h, s.x + s.w, s.y + s.h),
        (t.x + t.w, t.y, c.x + c.w, c.y, s.x + s.w, s.y),
    ];

    gl.begin(GL_QUADS);
    for (tx, ty, cx, cy, vx, vy) in corners {
        gl.tex_coord_2f(tx, ty);
        if planar {
            gl.multi_tex_coord_2f(GL_TEXTURE1, cx, cy);
            gl.multi_tex_coord_2f(GL_TEXTURE2, cx, cy);
        }
        gl.vertex_2f(vx, vy);
    }
    gl.end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{GlCall, OfflineResolver, RecordingGl};

    fn sub_images(gl: &RecordingGl) -> Vec<(i32, i32, usize)> {
        gl.calls()
            .into_iter()
            .filter_map(|call| match call {
                GlCall::TexSubImage2D {
                    y, height, pixels, ..
                } => Some((y, height, pixels.len())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_alignment() {
        assert_eq!(alignment_for(24), 8);
        assert_eq!(alignment_for(20), 4);
        assert_eq!(alignment_for(18), 2);
        assert_eq!(alignment_for(17), 1);
    }

    #[test]
    fn test_empty_region_is_noop() {
        let gl = RecordingGl::default();
        upload_region(&gl, GL_TEXTURE_2D, GL_LUMINANCE, GL_UNSIGNED_BYTE, &[], 4, 0, 0, 0, 3, 0)
            .unwrap();
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_sliced_upload_with_remainder() {
        let gl = RecordingGl::default();
        let data = vec![0u8; 10 * 8];
        upload_region(&gl, GL_TEXTURE_2D, GL_LUMINANCE, GL_UNSIGNED_BYTE, &data, 8, 0, 0, 6, 10, 4)
            .unwrap();
        assert_eq!(sub_images(&gl), vec![(0, 4, 30), (4, 4, 30), (8, 2, 14)]);
        assert!(gl.calls().contains(&GlCall::PixelStore {
            pname: GL_UNPACK_ROW_LENGTH,
            param: 8
        }));
    }

    #[test]
    fn test_rgb_row_length_in_pixels() {
        let gl = RecordingGl::default();
        let data = vec![0u8; 2 * 12];
        upload_region(&gl, GL_TEXTURE_2D, GL_RGB, GL_UNSIGNED_BYTE, &data, 12, 0, 0, 4, 2, 0)
            .unwrap();
        assert!(gl.calls().contains(&GlCall::PixelStore {
            pname: GL_UNPACK_ROW_LENGTH,
            param: 4
        }));
        assert!(gl.calls().contains(&GlCall::PixelStore {
            pname: GL_UNPACK_ALIGNMENT,
            param: 4
        }));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let gl = RecordingGl::default();
        let err = upload_region(&gl, GL_TEXTURE_2D, GL_LUMINANCE, GL_UNSIGNED_BYTE, &[0; 10], 4, 0, 0, 4, 4, 0)
            .unwrap_err();
        assert!(matches!(err, GlError::InvalidParameter(_)));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_clear_texture_parameters() {
        let gl = RecordingGl::default();
        create_clear_texture(&gl, GL_TEXTURE_2D, GL_ALPHA, GL_LINEAR, 3, 2, 255).unwrap();
        let calls = gl.calls();
        assert!(calls.iter().any(|c| matches!(
            c,
            GlCall::TexImage2D { format: GL_ALPHA, width: 3, height: 2, pixels, .. }
                if pixels.len() == 6 && pixels.iter().all(|&p| p == 255)
        )));
        assert!(calls.contains(&GlCall::TexParameterFv {
            target: GL_TEXTURE_2D,
            pname: GL_TEXTURE_BORDER_COLOR,
            params: [1.0; 4],
        }));
        assert!(calls.contains(&GlCall::PixelStore {
            pname: GL_UNPACK_ALIGNMENT,
            param: 1
        }));
    }

    #[test]
    fn test_frame_upload_in_slices() {
        let gl = RecordingGl::default();
        let frame = vec![0u8; 4 * 3 * 10];
        upload_frame(&gl, GL_TEXTURE_2D, PixelFormat::RGB24, &frame, 12, 4, 10, 4).unwrap();
        assert_eq!(sub_images(&gl), vec![(0, 4, 48), (4, 4, 48), (8, 2, 24)]);
        assert!(gl.calls().contains(&GlCall::PixelStore {
            pname: GL_UNPACK_ROW_LENGTH,
            param: 4
        }));
    }

    #[test]
    fn test_frame_upload_rejects_fallback_formats() {
        let gl = RecordingGl::default();
        let frame = vec![0u8; 64];
        let err = upload_frame(&gl, GL_TEXTURE_2D, PixelFormat::YUY2, &frame, 8, 4, 4, 0)
            .unwrap_err();
        assert!(matches!(err, GlError::InvalidParameter(_)));
        assert!(gl.calls().is_empty());

        upload_frame(&gl, GL_TEXTURE_2D, PixelFormat::YV12, &frame, 8, 8, 8, 0).unwrap();
        assert_eq!(sub_images(&gl), vec![(0, 8, 64)]);
    }

    #[test]
    fn test_ppm_texture() {
        let gl = RecordingGl::default();
        let mut bytes = b"P6\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
        let info = create_ppm_texture(&gl, GL_TEXTURE_2D, GL_RGB, GL_LINEAR, &bytes).unwrap();
        assert_eq!(info, PpmInfo { width: 2, height: 1, maxval: 255 });
        assert_eq!(sub_images(&gl), vec![(0, 1, 6)]);
    }

    #[test]
    fn test_ppm_rejects_ascii_and_oversize() {
        let gl = RecordingGl::default();
        let ascii = b"P3\n1 1\n255\n1 2 3\n";
        let err = create_ppm_texture(&gl, GL_TEXTURE_2D, GL_RGB, GL_LINEAR, ascii).unwrap_err();
        assert!(matches!(err, GlError::Image(_)));

        let huge = b"P6\n16385 1\n255\n";
        let err = create_ppm_texture(&gl, GL_TEXTURE_2D, GL_RGB, GL_LINEAR, huge).unwrap_err();
        assert!(matches!(err, GlError::Image(_)));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_draw_planar_flipped() {
        let gl = RecordingGl::with_extensions(&OfflineResolver::all(), "");
        draw_texture(
            &gl,
            TextureRect::new(0.0, 0.0, 100.0, 50.0),
            TextureRect::new(0.0, 0.0, 64.0, 32.0),
            (128, 64),
            false,
            true,
            true,
        );
        let calls = gl.calls();
        assert_eq!(calls.first(), Some(&GlCall::Begin(GL_QUADS)));
        assert_eq!(calls.last(), Some(&GlCall::End));
        assert!(calls.contains(&GlCall::Vertex2f(0.0, 50.0)));
        assert!(calls.contains(&GlCall::Vertex2f(100.0, 0.0)));
        assert!(calls.contains(&GlCall::TexCoord2f(0.5, 0.5)));
        assert!(calls.contains(&GlCall::MultiTexCoord2f(GL_TEXTURE2, 0.5, 0.5)));
    }

    #[test]
    fn test_draw_rect_halves_chroma() {
        let gl = RecordingGl::with_extensions(&OfflineResolver::all(), "");
        draw_texture(
            &gl,
            TextureRect::new(0.0, 0.0, 10.0, 10.0),
            TextureRect::new(0.0, 0.0, 64.0, 32.0),
            (64, 32),
            true,
            true,
            false,
        );
        assert!(gl.calls().contains(&GlCall::TexCoord2f(64.0, 32.0)));
        assert!(gl.calls().contains(&GlCall::MultiTexCoord2f(GL_TEXTURE1, 32.0, 16.0)));
    }
}
