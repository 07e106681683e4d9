//! Output-path derivation. Every page is written as `<dir>/index.html` so
//! published URLs stay extension-less and stable.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub fn home_page_path(output_root: &Path) -> PathBuf {
    output_root.join("index.html")
}

pub fn series_page_path(output_root: &Path, slug: &str) -> PathBuf {
    output_root.join("novel").join(slug).join("index.html")
}

pub fn chapter_page_path(output_root: &Path, slug: &str, chapter_id: u64) -> PathBuf {
    output_root
        .join("novel")
        .join(slug)
        .join("chapter")
        .join(chapter_id.to_string())
        .join("index.html")
}

pub fn sitemap_path(output_root: &Path) -> PathBuf {
    output_root.join("sitemap.xml")
}

/// Writes one rendered page, creating parent directories as needed.
/// Concurrent creation of overlapping parents is fine; distinct jobs never
/// write the same file.
pub async fn write_page(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("page path has no parent: {}", path.display()))?;
    tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("create page dir: {}", parent.display()))?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("write page: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_published_url_scheme() {
        let root = Path::new("dist");
        assert_eq!(home_page_path(root), Path::new("dist/index.html"));
        assert_eq!(
            series_page_path(root, "echo"),
            Path::new("dist/novel/echo/index.html")
        );
        assert_eq!(
            chapter_page_path(root, "echo", 11),
            Path::new("dist/novel/echo/chapter/11/index.html")
        );
        assert_eq!(sitemap_path(root), Path::new("dist/sitemap.xml"));
    }

    #[tokio::test]
    async fn write_page_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = chapter_page_path(dir.path(), "echo", 11);

        write_page(&path, b"<html></html>").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<html></html>");

        // Re-writing through already-existing parents must not error.
        write_page(&path, b"<html>2</html>").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<html>2</html>");
    }
}
