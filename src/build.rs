use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::r#gen::{Pipeline, PipelineOptions, output};
use crate::render::{HtmlRenderer, Page, PageRenderer};
use crate::sitemap;
use crate::store::{ContentStore, SqlContentStore};

pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = Config::load(Path::new(&args.config)).context("load config")?;

    let store: Arc<dyn ContentStore> = Arc::new(
        SqlContentStore::connect(&config.database.url)
            .await
            .context("connect content store")?,
    );
    let renderer: Arc<dyn PageRenderer> = Arc::new(HtmlRenderer);

    let out = config.site.output_dir.clone();
    tracing::info!(out = %out.display(), "build: prepare output root");
    prepare_output_root(&out).await.context("prepare output root")?;
    copy_assets(&config.site.assets_dir, &out.join("assets"))
        .await
        .context("copy static assets")?;

    tracing::info!("build: homepage");
    let series_list = store.list_series().await.context("list series")?;
    let home = renderer
        .render(&Page::Home {
            series: &series_list,
        })
        .context("render homepage")?;
    output::write_page(&output::home_page_path(&out), &home)
        .await
        .context("write homepage")?;

    tracing::info!("build: series and chapters");
    let pipeline = Pipeline::new(
        Arc::clone(&store),
        Arc::clone(&renderer),
        PipelineOptions {
            output_root: out.clone(),
            workers: config.site.workers(),
            queue_capacity: config.site.queue_capacity,
            progress_interval: config.site.progress_interval(),
        },
    );
    let outcome = pipeline.run().await.context("generate content")?;

    tracing::info!("build: sitemap");
    sitemap::write(
        &output::sitemap_path(&out),
        &config.site.base_url,
        &series_list,
    )
    .await
    .context("write sitemap")?;

    tracing::info!(
        pages = outcome.pages_written,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "generation complete"
    );
    Ok(())
}

/// Each run starts from a clean output root so stale pages from removed
/// series cannot linger.
async fn prepare_output_root(out: &Path) -> anyhow::Result<()> {
    match tokio::fs::remove_dir_all(out).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("clean output dir: {}", out.display()));
        }
    }
    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("create output dir: {}", out.display()))?;
    Ok(())
}

/// Copies the top-level regular files of the assets directory; nested
/// directories are not published.
async fn copy_assets(src: &Path, dest: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dest)
        .await
        .with_context(|| format!("create assets dir: {}", dest.display()))?;

    let mut entries = tokio::fs::read_dir(src)
        .await
        .with_context(|| format!("read assets dir: {}", src.display()))?;
    while let Some(entry) = entries.next_entry().await.context("read assets entry")? {
        let file_type = entry.file_type().await.context("stat assets entry")?;
        if !file_type.is_file() {
            continue;
        }
        let target = dest.join(entry.file_name());
        tokio::fs::copy(entry.path(), &target)
            .await
            .with_context(|| format!("copy asset: {}", entry.path().display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepare_output_root_clears_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        std::fs::create_dir_all(out.join("novel/stale")).unwrap();
        std::fs::write(out.join("novel/stale/index.html"), "old").unwrap();

        prepare_output_root(&out).await.unwrap();
        assert!(out.exists());
        assert!(!out.join("novel").exists());
    }

    #[tokio::test]
    async fn prepare_output_root_accepts_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fresh");
        prepare_output_root(&out).await.unwrap();
        assert!(out.exists());
    }

    #[tokio::test]
    async fn copy_assets_takes_files_and_ignores_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("site.css"), "body{}").unwrap();
        std::fs::write(src.join("nested/skipped.css"), "x").unwrap();

        let dest = dir.path().join("out/assets");
        copy_assets(&src, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("site.css")).unwrap(), "body{}");
        assert!(!dest.join("nested").exists());
        assert!(!dest.join("skipped.css").exists());
    }

    #[tokio::test]
    async fn copy_assets_fails_when_source_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_assets(&dir.path().join("nope"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("read assets dir"));
    }
}
