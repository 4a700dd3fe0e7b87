//! Frame output: sinks for recorded preview animations.

use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::foundation::math::mul_div255_u16;

pub mod sink;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> DamascusResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Composite RGBA8 pixels over an opaque background color.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: Rgba8,
) -> DamascusResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DamascusError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let (bg_r, bg_g, bg_b) = (u16::from(bg.r), u16::from(bg.g), u16::from(bg.b));

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255 - a;
        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255_u16(bg_r, inv),
                u16::from(s[1]) + mul_div255_u16(bg_g, inv),
                u16::from(s[2]) + mul_div255_u16(bg_b, inv),
            )
        } else {
            (
                mul_div255_u16(u16::from(s[0]), a) + mul_div255_u16(bg_r, inv),
                mul_div255_u16(u16::from(s[1]), a) + mul_div255_u16(bg_g, inv),
                mul_div255_u16(u16::from(s[2]), a) + mul_div255_u16(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/flatten.rs"]
mod tests;
