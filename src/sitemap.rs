use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::store::Series;

/// Builds the sitemap document: the homepage plus one entry per series,
/// `lastmod` taken from the series' last update. Chapter pages are omitted
/// deliberately; crawlers reach them through the series pages.
pub fn render(base_url: &str, series: &[Series]) -> String {
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    doc.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    let _ = write!(
        doc,
        "  <url>\n    <loc>{base_url}/</loc>\n    <changefreq>daily</changefreq>\n    <priority>1.0</priority>\n  </url>\n"
    );

    for s in series {
        let lastmod = s.updated_at.format("%Y-%m-%d");
        let _ = write!(
            doc,
            "  <url>\n    <loc>{base_url}/novel/{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>daily</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            s.slug
        );
    }

    doc.push_str("</urlset>\n");
    doc
}

pub async fn write(path: &Path, base_url: &str, series: &[Series]) -> anyhow::Result<()> {
    let doc = render(base_url, series);
    tokio::fs::write(path, doc)
        .await
        .with_context(|| format!("write sitemap: {}", path.display()))?;
    Ok(())
}
