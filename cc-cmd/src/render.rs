//! Batch driver: write the combined calendar image to durable storage.

use anyhow::Context;
use cc_calendar::{render, to_svg, Geometry, Palette};
use cc_series::{aggregate, parse_identities, ContributionSource, DEFAULT_MAX_IDENTITIES};
use log::info;
use std::path::Path;

/// Fetch `users`, render their combined calendar and write it to `output`.
///
/// The file is written next to its final path first and then renamed over
/// it, so readers never see a half-written image.
pub async fn run_render<S>(
    source: &S,
    users: &str,
    output: &Path,
    legend: bool,
) -> anyhow::Result<()>
where
    S: ContributionSource + ?Sized,
{
    let identities = parse_identities(users, DEFAULT_MAX_IDENTITIES)?;
    info!("Rendering calendar for {}", identities.join(", "));
    let summary = aggregate(source, &identities).await?;

    let geometry = Geometry {
        legend,
        ..Geometry::default()
    };
    let calendar = render(&summary, &geometry);
    let svg = to_svg(&calendar, &Palette::default());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let staging = output.with_extension("svg.tmp");
    std::fs::write(&staging, svg.as_bytes())
        .with_context(|| format!("writing {}", staging.display()))?;
    std::fs::rename(&staging, output)
        .with_context(|| format!("moving {} into place", staging.display()))?;

    info!(
        "Wrote {} ({} weeks, {} contributions)",
        output.display(),
        calendar.columns,
        summary.total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cc_series::{DailySeries, SourceError};
    use chrono::NaiveDate;

    struct StaticSource;

    #[async_trait]
    impl ContributionSource for StaticSource {
        async fn fetch(&self, identity: &str) -> Result<DailySeries, SourceError> {
            match identity {
                "alice" => Ok(DailySeries::from_iter([(
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    10,
                )])),
                _ => Err(SourceError::Status(404)),
            }
        }
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("cc-cmd-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn writes_svg_file() {
        let dir = scratch_dir("render");
        let output = dir.join("nested").join("calendar.svg");
        run_render(&StaticSource, "alice", &output, true).await.unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("data-date=\"2024-03-01\" data-count=\"10\""));
        assert!(!output.with_extension("svg.tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let dir = scratch_dir("render-fail");
        let output = dir.join("calendar.svg");
        let err = run_render(&StaticSource, "alice,nobody", &output, true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nobody"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn empty_identity_list_is_rejected() {
        let dir = scratch_dir("render-empty");
        let output = dir.join("calendar.svg");
        assert!(run_render(&StaticSource, " ", &output, true).await.is_err());
        assert!(!output.exists());
    }
}
