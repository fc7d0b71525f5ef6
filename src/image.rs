//! Pure sizing/quality math for the image-compression tool. Raster decode
//! and encode belong to the host imaging primitive and stay outside the
//! engines.

/// Pixel dimensions of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Clamp an encoder quality to [0.05, 1.0]; non-finite input falls back
/// to 0.8.
pub fn clamp_quality(quality: f64) -> f64 {
    if !quality.is_finite() {
        return 0.8;
    }
    quality.clamp(0.05, 1.0)
}

/// Compute the output dimensions for the given constraints, scaling by the
/// lesser of the width/height ratios and never upscaling. Zero or absent
/// constraints leave that axis unconstrained; each output dimension is
/// rounded and floored at 1.
pub fn target_size(src: Dimensions, max_width: Option<u32>, max_height: Option<u32>) -> Dimensions {
    let max_w = max_width.filter(|&w| w > 0);
    let max_h = max_height.filter(|&h| h > 0);
    if max_w.is_none() && max_h.is_none() {
        return src;
    }

    let ratio_w = max_w.map_or(1.0, |w| f64::from(w) / f64::from(src.width));
    let ratio_h = max_h.map_or(1.0, |h| f64::from(h) / f64::from(src.height));
    let ratio = ratio_w.min(ratio_h).min(1.0);

    Dimensions {
        width: ((f64::from(src.width) * ratio).round() as u32).max(1),
        height: ((f64::from(src.height) * ratio).round() as u32).max(1),
    }
}

/// Render a byte count as a human-readable size: two decimals below 10,
/// one below 100, none above.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let exp = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let idx = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(idx as i32);

    let formatted = if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    };
    format!("{} {}", formatted, UNITS[idx])
}
