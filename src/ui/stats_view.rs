use crate::model::{StatsLedger, LOSS_BUCKET, MAX_GUESSES};

const BAR_WIDTH: u32 = 24;

fn bucket_label(bucket: usize) -> String {
    if bucket == LOSS_BUCKET {
        "X".to_string()
    } else {
        bucket.to_string()
    }
}

/// Statistics panel: totals, then one bar per guess count (losses last).
/// `current_bucket` marks the bar the round just finished in.
pub fn render_stats(ledger: &StatsLedger, current_bucket: Option<usize>) -> String {
    let mut output = String::new();
    output.push_str("STATISTICS\n");
    output.push_str(&format!(
        "  {:>6}  {:>6}  {:>6}  {:>6}\n",
        "Played", "Win %", "Streak", "Max"
    ));
    output.push_str(&format!(
        "  {:>6}  {:>6}  {:>6}  {:>6}\n",
        ledger.played,
        ledger.win_percentage(),
        ledger.streak,
        ledger.max_streak
    ));
    output.push('\n');
    output.push_str("GUESS DISTRIBUTION\n");

    let largest = ledger
        .guess_distribution
        .values()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1);
    for bucket in (1..=MAX_GUESSES).chain(std::iter::once(LOSS_BUCKET)) {
        let count = ledger.distribution_count(bucket);
        let width = if count == 0 {
            0
        } else {
            (count * BAR_WIDTH / largest).max(1)
        };
        let marker = if current_bucket == Some(bucket) { " <" } else { "" };
        let bar = if width == 0 {
            String::new()
        } else {
            format!("{} ", "█".repeat(width as usize))
        };
        output.push_str(&format!(
            "  {} | {}{}{}\n",
            bucket_label(bucket),
            bar,
            count,
            marker
        ));
    }
    output
}
