use crate::foundation::{
    error::{TraitmintError, TraitmintResult},
    math::div_round_u32,
};

/// One straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Porter-Duff source-over for straight-alpha pixels.
///
/// Colour channels are weighted by each side's effective coverage and divided by the
/// resulting alpha, so a layer over a fully transparent pixel comes out unchanged.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    // Coverage in units of 1/(255*255).
    let src_w = sa * 255;
    let dst_w = u32::from(dst[3]) * (255 - sa);
    let out_w = src_w + dst_w;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
        out[i] = div_round_u32(c, out_w) as u8;
    }
    out[3] = div_round_u32(out_w, 255) as u8;
    out
}

/// Blend `src` over `dst` pixel by pixel.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> TraitmintResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TraitmintError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
