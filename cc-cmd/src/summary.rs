//! Print the combined summary as JSON, optionally exporting CSV.

use anyhow::Context;
use cc_series::{
    aggregate, parse_identities, ContributionSource, DailySeries, DEFAULT_MAX_IDENTITIES,
};
use cc_utils::dates::format_date;
use csv::Writer;
use log::info;
use std::io::Write;
use std::path::Path;

/// Write `series` as headerless `YYYY-MM-DD,count` rows in date order.
pub fn write_csv<W: Write>(series: &DailySeries, writer: W) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(writer);
    for (date, count) in series.iter() {
        writer.write_record([format_date(date), count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn run_summary<S>(source: &S, users: &str, csv_path: Option<&Path>) -> anyhow::Result<()>
where
    S: ContributionSource + ?Sized,
{
    let identities = parse_identities(users, DEFAULT_MAX_IDENTITIES)?;
    let summary = aggregate(source, &identities).await?;

    if let Some(path) = csv_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_csv(&summary.counts, file)?;
        info!("Wrote {} rows to {}", summary.counts.len(), path.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
    Ok(())
}
