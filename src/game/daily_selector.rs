use chrono::{Local, NaiveDate};

/// Day zero of the rotation: puzzle 0 was the puzzle of 2024-01-01.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("epoch is a valid calendar date")
}

/// The player's current calendar day, in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_since_epoch(today: NaiveDate) -> i64 {
    today.signed_duration_since(epoch()).num_days()
}

/// Maps a calendar day onto a corpus position. An explicit override wins
/// over the date and is wrapped into `[0, corpus_size)`, negatives included.
pub fn select_index(today: NaiveDate, corpus_size: usize, puzzle_override: Option<i64>) -> usize {
    assert!(corpus_size > 0, "cannot select a puzzle from an empty corpus");
    let size = corpus_size as i64;
    let position = puzzle_override.unwrap_or_else(|| days_since_epoch(today));
    position.rem_euclid(size) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_selects_first_puzzle() {
        assert_eq!(select_index(date(2024, 1, 1), 45, None), 0);
        assert_eq!(select_index(date(2024, 1, 2), 45, None), 1);
    }

    #[test]
    fn test_rotation_wraps_around_corpus() {
        // 2024 is a leap year: 2025-01-01 is day 366
        assert_eq!(days_since_epoch(date(2025, 1, 1)), 366);
        assert_eq!(select_index(date(2025, 1, 1), 45, None), 366 % 45);
        assert_eq!(select_index(date(2024, 2, 15), 45, None), 0);
    }

    #[test]
    fn test_same_day_same_index() {
        let day = date(2026, 10, 16);
        let first = select_index(day, 45, None);
        for _ in 0..3 {
            assert_eq!(select_index(day, 45, None), first);
        }
    }

    #[test]
    fn test_override_wins_and_wraps() {
        let day = date(2026, 10, 16);
        assert_eq!(select_index(day, 45, Some(7)), 7);
        assert_eq!(select_index(day, 45, Some(45)), 0);
        assert_eq!(select_index(day, 45, Some(100)), 10);
        assert_eq!(select_index(day, 45, Some(-1)), 44);
        assert_eq!(select_index(day, 45, Some(-46)), 44);
    }

    #[test]
    fn test_dates_before_epoch_stay_in_range() {
        let index = select_index(date(2023, 12, 31), 45, None);
        assert_eq!(index, 44);
    }

    #[test]
    #[should_panic(expected = "empty corpus")]
    fn test_empty_corpus_is_fatal() {
        select_index(date(2024, 1, 1), 0, None);
    }
}
