use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{StarmapError, StarmapResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u8;
    let sa = mul_div255_u8(src[3], op);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - sa;

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(dst[3], inv));
    for i in 0..3 {
        let sc = mul_div255_u8(src[i], op);
        let dc = mul_div255_u8(dst[i], inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

fn check_same_len(dst: &[u8], src: &[u8], what: &str) -> StarmapResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StarmapError::render(format!(
            "{what} expects equal-length rgba8 buffers ({} vs {})",
            dst.len(),
            src.len()
        )));
    }
    Ok(())
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> StarmapResult<()> {
    check_same_len(dst, src, "over_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Destination-in: keep `dst` where `mask` has coverage, scaled by the mask alpha.
pub fn dest_in_in_place(dst: &mut [u8], mask: &[u8]) -> StarmapResult<()> {
    check_same_len(dst, mask, "dest_in_in_place")?;
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let ma = m[3];
        if ma == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(*c, ma);
        }
    }
    Ok(())
}

pub fn fill_in_place(dst: &mut [u8], color: Rgba8Premul) {
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = mul_div255_u8(*c, a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pixel.rs"]
mod tests;
