//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Pot over a flame, square viewBox for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 256 256"><rect x="40" y="60" width="176" height="96" rx="18" fill="#fff"/><rect x="24" y="52" width="208" height="20" rx="10" fill="#fff"/><path d="M128 244c-34 0-56-22-56-50 0-26 20-40 30-58 4 14 12 22 22 26-2-18 6-34 20-44 0 22 40 36 40 76 0 28-22 50-56 50z" fill="#fb923c"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Per-user data directory (storage, settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Format seconds as MM:SS. Minutes are not wrapped at an hour.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// "1 step" / "3 steps"
pub fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Image URI for egui's loaders. Bare filesystem paths become file:// URIs.
pub fn image_uri(reference: &str) -> String {
    if reference.contains("://") {
        reference.to_string()
    } else {
        format!("file://{}", reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(125 * 60 + 7), "125:07");
    }

    #[test]
    fn pluralizes() {
        assert_eq!(plural(1, "step"), "1 step");
        assert_eq!(plural(0, "step"), "0 steps");
        assert_eq!(plural(4, "step"), "4 steps");
    }

    #[test]
    fn image_uris() {
        assert_eq!(image_uri("/home/me/pan.png"), "file:///home/me/pan.png");
        assert_eq!(image_uri("https://example.com/a.jpg"), "https://example.com/a.jpg");
    }

    #[test]
    fn icon_rasterizes() {
        let (rgba, w, h) = rasterize_icon(64).unwrap();
        assert_eq!((w, h), (64, 64));
        assert_eq!(rgba.len(), 64 * 64 * 4);
        assert!(rgba.chunks(4).any(|p| p[3] > 0));
    }
}
