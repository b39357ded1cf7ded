use std::io::Write;

use serde::Serialize;

use super::scorecard::Scorecard;

#[derive(Debug, Serialize)]
struct ScorecardCsvRow<'a> {
    factor: &'a str,
    label: &'a str,
    base: String,
    adjusted: String,
    delta: String,
}

/// Write a scorecard as `factor,label,base,adjusted,delta` rows in registry order.
pub fn write_scorecard_csv<W: Write>(scorecard: &Scorecard, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    for row in &scorecard.rows {
        csv_writer.serialize(ScorecardCsvRow {
            factor: row.factor_id.as_str(),
            label: row.label,
            base: format!("{:.3}", row.base),
            adjusted: format!("{:.3}", row.adjusted),
            delta: format!("{:+.3}", row.delta),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
