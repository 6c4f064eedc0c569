//! HTML rendering: one self-contained detail page per record, plus the QR
//! index page that lists every product.
//!
//! Rendering is a pure function of the record and the base URL. The page
//! always links the record's QR image and share URL even when the QR stage
//! has not run yet; the two stages are independent.

use super::qr::product_url;
use crate::record::ProductRecord;
use std::fmt::Write as _;

/// Stylesheet shared by every generated page, relative to `public/product/`.
const STYLESHEET: &str = "../css/style.css";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Labeled detail rows for every non-empty descriptive field, in display order.
pub fn detail_entries(record: &ProductRecord) -> Vec<(&'static str, String)> {
    let weight = if record.weight.is_empty() {
        String::new()
    } else {
        format!("{} gm", record.weight)
    };

    [
        ("Product Code", record.label.clone()),
        ("Serial No.", record.serial.clone()),
        ("Category", record.category.clone()),
        ("Weight", weight),
        ("Processes", record.processes.clone()),
        ("Cost Price", record.cost_price.clone()),
        ("HS Code", record.hs_code.clone()),
        ("Variations", record.variations.clone()),
        ("Tags", record.tags.clone()),
        ("Attributes", record.attributes.clone()),
        ("Additional Category", record.additional_category.clone()),
        ("Occasion", record.occasion.clone()),
        ("Type", record.kind.clone()),
        ("Stock", record.stock.clone()),
        ("Photo", record.photo.clone()),
    ]
    .into_iter()
    .filter(|(_, v)| !v.trim().is_empty())
    .collect()
}

fn image_block(record: &ProductRecord) -> String {
    let name = escape_html(&record.name);
    match record.primary_image() {
        Some(src) => format!(
            r#"<img src="{}" alt="{name}" class="product-image-large" loading="lazy">"#,
            escape_html(src)
        ),
        None => format!(
            r#"<div class="product-image-large placeholder-image">
                        <span>📦 {name}</span>
                    </div>"#
        ),
    }
}

fn details_block(record: &ProductRecord) -> String {
    let mut html = String::new();
    for (label, value) in detail_entries(record) {
        let _ = write!(
            html,
            r#"
                            <div class="info-item">
                                <span class="info-label">{label}:</span>
                                <span class="info-value">{}</span>
                            </div>"#,
            escape_html(&value)
        );
    }
    html
}

fn external_links(record: &ProductRecord) -> String {
    let mut links = Vec::new();
    if !record.website_link.is_empty() {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener" class="btn btn-outline">View on Feltandyarn.com</a>"#,
            escape_html(&record.website_link)
        ));
    }
    if !record.drive_link.is_empty() {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener" class="btn btn-outline">Drive folder</a>"#,
            escape_html(&record.drive_link)
        ));
    }
    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="mt-3">{}</div>"#, links.join("\n"))
    }
}

/// Render the detail page for one product.
pub fn render_product_page(record: &ProductRecord, base_url: &str) -> String {
    let name = escape_html(&record.name);
    let id = escape_html(&record.id);
    let meta_description = if record.description.is_empty() {
        format!("{name} - Felt and Yarn Product")
    } else {
        escape_html(&record.description)
    };
    let subtitle = if record.description.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="hero-subtitle">{}</p>"#,
            escape_html(&record.description)
        )
    };
    let share_url = escape_html(&product_url(base_url, &record.id));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{meta_description}">
    <title>{name} | Felt and Yarn</title>
    <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
    <nav>
        <div class="container">
            <a href="../index.html" class="logo">Felt &amp; Yarn</a>
            <ul class="nav-links">
                <li><a href="../index.html">Home</a></li>
                <li><a href="../qr-index.html">QR Codes</a></li>
            </ul>
        </div>
    </nav>

    <main class="product-detail">
        <div class="container">
            <div class="product-detail-container animate-in">
                <div class="product-image-section">
                    {image}
                </div>

                <div class="product-info">
                    <div>
                        <span class="badge">{category}</span>
                        <h1>{name}</h1>
                        {subtitle}
                    </div>

                    <div class="card">
                        <h3>Product Details</h3>
                        <div class="info-grid">{details}
                        </div>
                    </div>

                    <div class="qr-section">
                        <h3>Scan to Share</h3>
                        <p class="text-muted mb-2">Share this product with others</p>
                        <img src="../qr-codes/{id}.png" alt="QR Code" class="qr-code-img">
                        <div class="qr-actions">
                            <a href="../qr-codes/{id}.png" download class="btn btn-primary">Download QR PNG</a>
                            <a href="../qr-codes/{id}.svg" download class="btn btn-primary">Download QR SVG</a>
                        </div>
                    </div>

                    {links}
                </div>
            </div>
        </div>
    </main>

    <footer>
        <div class="container">
            <p>&copy; Felt and Yarn. All rights reserved.</p>
            <p><a href="{share_url}">Share this product</a></p>
        </div>
    </footer>
</body>
</html>
"#,
        image = image_block(record),
        category = escape_html(&record.category),
        details = details_block(record),
        links = external_links(record),
    )
}

/// Render the searchable index of every product and its QR code.
pub fn render_qr_index(records: &[ProductRecord], base_url: &str) -> String {
    let mut rows = String::new();
    for r in records {
        let id = escape_html(&r.id);
        let _ = write!(
            rows,
            r#"
            <tr>
                <td><img src="qr-codes/{id}.svg" alt="QR {id}" width="64" height="64" loading="lazy"></td>
                <td>{sn}</td>
                <td><a href="product/{id}.html">{name}</a></td>
                <td>{label}</td>
                <td>{category}</td>
                <td><code>{url}</code></td>
            </tr>"#,
            sn = escape_html(&r.serial),
            name = escape_html(&r.name),
            label = escape_html(&r.label),
            category = escape_html(&r.category),
            url = escape_html(&product_url(base_url, &r.id)),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR Codes | Felt and Yarn</title>
    <link rel="stylesheet" href="css/style.css">
</head>
<body>
    <main class="container">
        <h1>Products QR Index</h1>
        <p class="text-muted">{count} products. Search and open a product page to view details and QR code.</p>
        <input type="search" id="search" placeholder="Search by name, label, category...">
        <table id="products">
            <thead><tr><th>QR</th><th>SN</th><th>Name</th><th>Label</th><th>Category</th><th>URL</th></tr></thead>
            <tbody>{rows}
            </tbody>
        </table>
    </main>
    <script>
    const search = document.getElementById('search');
    search.addEventListener('input', () => {{
        const term = search.value.toLowerCase();
        for (const row of document.querySelectorAll('#products tbody tr')) {{
            row.style.display = row.innerText.toLowerCase().includes(term) ? '' : 'none';
        }}
    }});
    </script>
</body>
</html>
"#,
        count = records.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://feltandyarn.example";

    fn scarf() -> ProductRecord {
        ProductRecord {
            id: "scarves-rs01-1".into(),
            name: "Red Scarf".into(),
            label: "RS01".into(),
            category: "Scarves".into(),
            category_file: "Scarves".into(),
            ..Default::default()
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn image_link_is_primary_source() {
        let mut r = scarf();
        r.image_link = "https://img.example/red-scarf.jpg".into();
        let html = render_product_page(&r, BASE);
        assert!(html.contains(r#"<img src="https://img.example/red-scarf.jpg""#));
        assert!(!html.contains("placeholder-image"));
    }

    #[test]
    fn missing_image_renders_placeholder_with_name() {
        let html = render_product_page(&scarf(), BASE);
        assert!(html.contains("placeholder-image"));
        assert!(html.contains("📦 Red Scarf"));
        assert!(!html.contains(r#"src="""#));
        assert!(!html.contains("product-image-large\" loading"));
    }

    #[test]
    fn no_website_link_means_no_affordance() {
        let html = render_product_page(&scarf(), BASE);
        assert!(!html.contains("View on"));
        assert!(!html.contains("btn-outline"));

        let mut r = scarf();
        r.website_link = "https://feltandyarn.com/p/red-scarf".into();
        let html = render_product_page(&r, BASE);
        assert!(html.contains(r#"href="https://feltandyarn.com/p/red-scarf""#));
        assert!(html.contains("View on Feltandyarn.com"));
    }

    #[test]
    fn qr_and_share_links_always_present() {
        let html = render_product_page(&scarf(), BASE);
        assert!(html.contains(r#"src="../qr-codes/scarves-rs01-1.png""#));
        assert!(html.contains(r#"href="https://feltandyarn.example/product/scarves-rs01-1.html""#));
    }

    #[test]
    fn only_present_fields_become_details() {
        let mut r = scarf();
        r.weight = "120".into();
        r.hs_code = "6117.10".into();
        let entries = detail_entries(&r);
        let labels: Vec<_> = entries.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Product Code", "Category", "Weight", "HS Code"]);
        assert_eq!(entries[2].1, "120 gm");

        let html = render_product_page(&r, BASE);
        assert!(html.contains("HS Code:"));
        assert!(!html.contains("Tags:"));
        assert!(!html.contains("Stock:"));
        assert!(!html.contains("hero-subtitle"));
    }

    #[test]
    fn description_becomes_subtitle_and_meta() {
        let mut r = scarf();
        r.description = "Hand-felted <merino> wool".into();
        let html = render_product_page(&r, BASE);
        assert!(html.contains(r#"<p class="hero-subtitle">Hand-felted &lt;merino&gt; wool</p>"#));
        assert!(html.contains(r#"content="Hand-felted &lt;merino&gt; wool""#));
    }

    #[test]
    fn hostile_names_are_escaped() {
        let mut r = scarf();
        r.name = "<script>alert(1)</script>".into();
        let html = render_product_page(&r, BASE);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn qr_index_lists_every_product() {
        let mut other = scarf();
        other.id = "hats-h1-2".into();
        other.name = "Beanie".into();
        let html = render_qr_index(&[scarf(), other], BASE);
        assert!(html.contains(r#"href="product/scarves-rs01-1.html""#));
        assert!(html.contains(r#"src="qr-codes/hats-h1-2.svg""#));
        assert!(html.contains("https://feltandyarn.example/product/hats-h1-2.html"));
        assert!(html.contains("2 products."));
    }
}
