//! QR code rendering: product URL → SVG and PNG.
//!
//! Both encodings share one geometry: a 400-unit square, a 2-module quiet
//! margin, black modules on a white background. The symbol itself comes
//! from the `qrcode` crate at error-correction level M; drawing is done
//! here so the margin and size are exact instead of the crate's fixed
//! 4-module quiet zone.

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;
use std::io::Cursor;

/// Side length of both encodings, in pixels (PNG) or user units (SVG).
pub const QR_SIZE: u32 = 400;
/// Quiet margin around the symbol, in modules.
pub const QR_MARGIN: usize = 2;

const DARK_HEX: &str = "#000000";
const LIGHT_HEX: &str = "#ffffff";

/// Public URL of a product page.
pub fn product_url(base_url: &str, id: &str) -> String {
    format!("{}/product/{}.html", base_url.trim_end_matches('/'), id)
}

/// An encoded QR symbol ready to be drawn.
#[derive(Debug, Clone)]
pub struct QrImage {
    width: usize,
    modules: Vec<Color>,
}

impl QrImage {
    /// Encode `data` as a QR symbol.
    pub fn encode(data: &str) -> Result<Self, qrcode::types::QrError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
        Ok(Self {
            width: code.width(),
            modules: code.to_colors(),
        })
    }

    /// Modules per side, excluding the margin.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at (`x`, `y`) is dark. Out-of-range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x] == Color::Dark
    }

    /// Modules per side including the margin on both sides.
    fn total_modules(&self) -> usize {
        self.width + 2 * QR_MARGIN
    }

    /// Render as a square SVG document.
    ///
    /// The viewBox is measured in modules; each horizontal run of dark
    /// modules becomes one rectangle in a single path.
    pub fn to_svg(&self) -> String {
        let total = self.total_modules();
        let mut path = String::new();
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if !self.is_dark(x, y) {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < self.width && self.is_dark(x, y) {
                    x += 1;
                }
                let run = x - start;
                let _ = write!(
                    path,
                    "M{} {}h{}v1h-{}z",
                    start + QR_MARGIN,
                    y + QR_MARGIN,
                    run,
                    run
                );
            }
        }

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" "#,
                r#"viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
                r#"<path fill="{light}" d="M0 0h{total}v{total}H0z"/>"#,
                r#"<path fill="{dark}" d="{path}"/>"#,
                "</svg>\n"
            ),
            size = QR_SIZE,
            total = total,
            light = LIGHT_HEX,
            dark = DARK_HEX,
            path = path,
        )
    }

    /// Rasterise to an 8-bit grayscale bitmap.
    ///
    /// Each pixel maps back to the module `floor((p - margin*scale) / scale)`
    /// with `scale = QR_SIZE / total_modules`, so the symbol fills the square
    /// even when the size is not a multiple of the module count.
    pub fn to_bitmap(&self) -> GrayImage {
        let scale = QR_SIZE as f64 / self.total_modules() as f64;
        let margin = QR_MARGIN as f64 * scale;
        let module_at = |p: u32| -> Option<usize> {
            let offset = p as f64 - margin;
            if offset < 0.0 {
                return None;
            }
            let m = (offset / scale).floor() as usize;
            (m < self.width).then_some(m)
        };

        GrayImage::from_fn(QR_SIZE, QR_SIZE, |px, py| match (module_at(px), module_at(py)) {
            (Some(x), Some(y)) if self.is_dark(x, y) => Luma([0u8]),
            _ => Luma([255u8]),
        })
    }

    /// Render as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        self.to_bitmap()
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}

/// Both encodings of one product URL.
#[derive(Debug, Clone)]
pub struct QrArtifacts {
    pub svg: String,
    pub png: Vec<u8>,
}

/// Encode `url` and render both formats.
pub fn render_qr(url: &str) -> Result<QrArtifacts, String> {
    let image = QrImage::encode(url).map_err(|e| format!("QR encoding failed: {e}"))?;
    let png = image
        .to_png()
        .map_err(|e| format!("PNG encoding failed: {e}"))?;
    Ok(QrArtifacts {
        svg: image.to_svg(),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const URL: &str = "https://feltandyarn.example/product/scarves-rs01-1.html";

    fn decode_bitmap(bmp: &GrayImage) -> String {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            bmp.width() as usize,
            bmp.height() as usize,
            |x, y| bmp.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_, content) = grids[0].decode().unwrap();
        content
    }

    /// Dark modules drawn by the SVG path, as (x, y) in symbol coordinates.
    fn svg_dark_modules(svg: &str) -> HashSet<(usize, usize)> {
        const DARK_PATH: &str = r##"fill="#000000" d=""##;
        let start = svg.find(DARK_PATH).unwrap() + DARK_PATH.len();
        let path = &svg[start..start + svg[start..].find('"').unwrap()];
        let mut dark = HashSet::new();
        for segment in path.split('z').filter(|s| !s.is_empty()) {
            // M{x} {y}h{n}v1h-{n}
            let body = segment.strip_prefix('M').unwrap();
            let (x, rest) = body.split_once(' ').unwrap();
            let (y, rest) = rest.split_once('h').unwrap();
            let (n, _) = rest.split_once('v').unwrap();
            let (x, y, n): (usize, usize, usize) =
                (x.parse().unwrap(), y.parse().unwrap(), n.parse().unwrap());
            for dx in 0..n {
                dark.insert((x + dx - QR_MARGIN, y - QR_MARGIN));
            }
        }
        dark
    }

    #[test]
    fn product_url_joins_with_single_slash() {
        assert_eq!(
            product_url("https://x.example", "hats-h1-2"),
            "https://x.example/product/hats-h1-2.html"
        );
        assert_eq!(
            product_url("https://x.example/", "hats-h1-2"),
            "https://x.example/product/hats-h1-2.html"
        );
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let qr = QrImage::encode(URL).unwrap();
        assert!(qr.width() >= 21);
        assert!(qr.is_dark(0, 0));
        assert!(qr.is_dark(6, 6));
        assert!(!qr.is_dark(7, 7));
        assert!(!qr.is_dark(qr.width(), 0));
    }

    #[test]
    fn bitmap_geometry() {
        let qr = QrImage::encode(URL).unwrap();
        let bmp = qr.to_bitmap();
        assert_eq!(bmp.dimensions(), (QR_SIZE, QR_SIZE));
        // Margin corner is white, first finder module is black.
        assert_eq!(bmp.get_pixel(0, 0), &Luma([255]));
        let scale = QR_SIZE as f64 / (qr.width() + 2 * QR_MARGIN) as f64;
        let inside = (QR_MARGIN as f64 * scale + scale / 2.0) as u32;
        assert_eq!(bmp.get_pixel(inside, inside), &Luma([0]));
        assert!(bmp.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn png_round_trips_through_decoder() {
        let png = QrImage::encode(URL).unwrap().to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), QR_SIZE);
        assert_eq!(decoded.height(), QR_SIZE);
    }

    #[test]
    fn svg_layout() {
        let qr = QrImage::encode(URL).unwrap();
        let svg = qr.to_svg();
        let total = qr.width() + 2 * QR_MARGIN;
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"400\""));
        assert!(svg.contains(&format!("viewBox=\"0 0 {total} {total}\"")));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(svg.contains("fill=\"#000000\""));
        // Top-left finder row starts at the margin offset.
        assert!(svg.contains("M2 2h7v1h-7z"));
    }

    #[test]
    fn png_decodes_to_product_url() {
        let url = product_url("https://feltandyarn.example/", "scarves-rs01-1");
        let png = render_qr(&url).unwrap().png;
        let bmp = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_luma8();
        assert_eq!(decode_bitmap(&bmp), URL);
    }

    #[test]
    fn svg_draws_exactly_the_dark_modules() {
        let qr = QrImage::encode(URL).unwrap();
        let drawn = svg_dark_modules(&qr.to_svg());
        let expected: HashSet<(usize, usize)> = (0..qr.width())
            .flat_map(|y| (0..qr.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| qr.is_dark(x, y))
            .collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_qr(URL).unwrap();
        let b = render_qr(URL).unwrap();
        assert_eq!(a.svg, b.svg);
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn oversized_payload_fails() {
        let huge = "x".repeat(8000);
        assert!(render_qr(&huge).is_err());
    }
}
