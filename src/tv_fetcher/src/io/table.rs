use crate::models::bar::BarSeries;

/// Fixed-width text table of the last `max_rows` bars, header included.
pub fn render_table(series: &BarSeries, max_rows: usize) -> String {
    let mut out = format!(
        "{:<25} {:<20} {:>14} {:>14} {:>14} {:>14} {:>16}\n",
        "datetime", "symbol", "open", "high", "low", "close", "volume"
    );

    let skip = series.bars.len().saturating_sub(max_rows);
    for bar in &series.bars[skip..] {
        out.push_str(&format!(
            "{:<25} {:<20} {:>14.4} {:>14.4} {:>14.4} {:>14.4} {:>16.4}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            series.symbol,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }

    out.push_str(&format!("\n[{} rows x 7 columns]\n", series.bars.len() - skip));
    out
}
