//! Ledger emission.
//!
//! Amount columns are rounded to whole units at presentation time; the
//! inflation column keeps its full 18 fractional digits.

use crate::simulate::ProjectionRow;
use std::io;

/// Column names of the emitted ledger, in order.
pub const LEDGER_HEADER: [&str; 6] = [
    "Days Since Genesis Analyzed",
    "Tokens Unvesting",
    "Inflation",
    "Staking Rewards",
    "Circulating Supply",
    "Total Supply",
];

/// Write the projection ledger as delimited text.
pub fn write_ledger<W: io::Write>(writer: W, rows: &[ProjectionRow]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(LEDGER_HEADER)?;

    for row in rows {
        out.write_record(&[
            row.day.to_string(),
            row.unlocked.round_int().to_string(),
            row.inflation.to_string(),
            row.staking_rewards.round_int().to_string(),
            row.circulating_supply.round_int().to_string(),
            row.total_supply.round_int().to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
