use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::collections::BTreeMap;

use super::{GameResult, MAX_GUESSES};

/// Distribution bucket that counts losses.
pub const LOSS_BUCKET: usize = 0;

/// All-time statistics across days. `lastPlayed` is `""` until the first
/// finished session.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsLedger {
    pub streak: u32,
    pub max_streak: u32,
    pub played: u32,
    pub won: u32,
    pub guess_distribution: BTreeMap<usize, u32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub last_played: Option<NaiveDate>,
}

impl Default for StatsLedger {
    fn default() -> Self {
        Self {
            streak: 0,
            max_streak: 0,
            played: 0,
            won: 0,
            guess_distribution: (LOSS_BUCKET..=MAX_GUESSES).map(|bucket| (bucket, 0)).collect(),
            last_played: None,
        }
    }
}

impl StatsLedger {
    /// Folds one finished session into the ledger. Pure: callers make sure
    /// each session is recorded at most once.
    pub fn record_result(&self, result: GameResult, guess_count: usize, today: NaiveDate) -> Self {
        let mut next = self.clone();

        next.streak = match result {
            GameResult::Won if self.continues_streak(today) => self.streak + 1,
            GameResult::Won => 1,
            GameResult::Lost => 0,
        };
        next.max_streak = self.max_streak.max(next.streak);
        next.played += 1;

        let bucket = match result {
            GameResult::Won => {
                next.won += 1;
                guess_count
            }
            GameResult::Lost => LOSS_BUCKET,
        };
        *next.guess_distribution.entry(bucket).or_insert(0) += 1;
        next.last_played = Some(today);
        next
    }

    // playing again on the same day must not break the streak either
    fn continues_streak(&self, today: NaiveDate) -> bool {
        match self.last_played {
            Some(last) => last == today || Some(last) == today.checked_sub_days(Days::new(1)),
            None => false,
        }
    }

    pub fn distribution_count(&self, bucket: usize) -> u32 {
        self.guess_distribution.get(&bucket).copied().unwrap_or(0)
    }

    pub fn win_percentage(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        ((self.won as f64 / self.played as f64) * 100.0).round() as u32
    }

    pub fn is_consistent(&self) -> bool {
        let distribution_total: u32 = self.guess_distribution.values().sum();
        self.max_streak >= self.streak
            && self.played >= self.won
            && distribution_total == self.played
            && self
                .guess_distribution
                .keys()
                .all(|bucket| *bucket <= MAX_GUESSES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_default_is_zeroed() {
        let ledger = StatsLedger::default();
        assert_eq!(ledger.played, 0);
        assert_eq!(ledger.guess_distribution.len(), MAX_GUESSES + 1);
        assert!(ledger.guess_distribution.values().all(|count| *count == 0));
        assert!(ledger.is_consistent());
        assert_eq!(ledger.win_percentage(), 0);
    }

    #[test]
    fn test_first_win_starts_streak() {
        let ledger = StatsLedger::default().record_result(GameResult::Won, 3, day(10));
        assert_eq!(ledger.streak, 1);
        assert_eq!(ledger.max_streak, 1);
        assert_eq!(ledger.played, 1);
        assert_eq!(ledger.won, 1);
        assert_eq!(ledger.distribution_count(3), 1);
        assert_eq!(ledger.last_played, Some(day(10)));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_win_after_yesterday_extends_streak() {
        let ledger = StatsLedger::default()
            .record_result(GameResult::Won, 2, day(10))
            .record_result(GameResult::Won, 3, day(11));
        assert_eq!(ledger.streak, 2);
        assert_eq!(ledger.max_streak, 2);
        assert_eq!(ledger.distribution_count(2), 1);
        assert_eq!(ledger.distribution_count(3), 1);
    }

    #[test]
    fn test_same_day_win_extends_streak() {
        let ledger = StatsLedger::default()
            .record_result(GameResult::Won, 1, day(10))
            .record_result(GameResult::Won, 1, day(10));
        assert_eq!(ledger.streak, 2);
    }

    #[test]
    fn test_gap_resets_streak_to_one() {
        let ledger = StatsLedger::default()
            .record_result(GameResult::Won, 4, day(10))
            .record_result(GameResult::Won, 4, day(11))
            .record_result(GameResult::Won, 5, day(14));
        assert_eq!(ledger.streak, 1);
        assert_eq!(ledger.max_streak, 2);
    }

    #[test]
    fn test_loss_resets_streak_and_counts_bucket_zero() {
        let before = StatsLedger::default()
            .record_result(GameResult::Won, 1, day(10))
            .record_result(GameResult::Won, 2, day(11));
        let after = before.record_result(GameResult::Lost, MAX_GUESSES, day(12));
        assert_eq!(after.streak, 0);
        assert_eq!(after.max_streak, 2);
        assert_eq!(after.played, 3);
        assert_eq!(after.won, 2);
        assert_eq!(after.distribution_count(LOSS_BUCKET), before.distribution_count(LOSS_BUCKET) + 1);
        assert_eq!(after.win_percentage(), 67);
        assert!(after.is_consistent());
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let jan_31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let feb_1 = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let ledger = StatsLedger::default()
            .record_result(GameResult::Won, 2, jan_31)
            .record_result(GameResult::Won, 2, feb_1);
        assert_eq!(ledger.streak, 2);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(StatsLedger::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "streak": 0,
                "maxStreak": 0,
                "played": 0,
                "won": 0,
                "guessDistribution": {"0": 0, "1": 0, "2": 0, "3": 0, "4": 0, "5": 0},
                "lastPlayed": ""
            })
        );

        let ledger = StatsLedger::default().record_result(GameResult::Won, 2, day(5));
        let text = serde_json::to_string(&ledger).unwrap();
        assert!(text.contains("\"lastPlayed\":\"2025-01-05\""));
        let restored: StatsLedger = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_inconsistent_ledger_detected() {
        let mut ledger = StatsLedger::default().record_result(GameResult::Won, 2, day(5));
        ledger.played = 4;
        assert!(!ledger.is_consistent());

        let mut ledger = StatsLedger::default();
        ledger.streak = 3;
        assert!(!ledger.is_consistent());
    }
}
