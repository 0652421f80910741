use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::error::{Result, RotaError};
use super::types::CalendarDate;

/// Fixed, gap-free run of consecutive dates that a rota covers.
///
/// All window and run arithmetic works on positions within the horizon,
/// looked up through a precomputed date -> position map.
#[derive(Debug, Clone)]
pub struct Horizon {
    dates: Vec<CalendarDate>,
    positions: HashMap<CalendarDate, usize>,
}

impl Horizon {
    /// Builds a horizon from dates that must increase by exactly one day
    pub fn new(dates: Vec<CalendarDate>) -> Result<Self> {
        if dates.is_empty() {
            return Err(RotaError::EmptyHorizon);
        }
        for pair in dates.windows(2) {
            if pair[0].next_day() != Some(pair[1]) {
                return Err(RotaError::NonContiguousHorizon {
                    previous: pair[0].to_string(),
                    next: pair[1].to_string(),
                });
            }
        }
        let positions = dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        Ok(Self { dates, positions })
    }

    /// Every date from `start` to `end`, both inclusive
    pub fn from_range(start: CalendarDate, end: CalendarDate) -> Result<Self> {
        if end < start {
            return Err(RotaError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let mut dates = vec![start];
        let mut current = start;
        while current < end {
            current = current
                .next_day()
                .ok_or_else(|| RotaError::InvalidDate(current.to_string()))?;
            dates.push(current);
        }
        Self::new(dates)
    }

    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn start(&self) -> CalendarDate {
        self.dates[0]
    }

    pub fn end(&self) -> CalendarDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn get(&self, position: usize) -> Option<CalendarDate> {
        self.dates.get(position).copied()
    }

    pub fn position(&self, date: &CalendarDate) -> Option<usize> {
        self.positions.get(date).copied()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.positions.contains_key(date)
    }

    /// Positions of the trailing window of `window_days` ending at `position`,
    /// clipped at the start of the horizon
    pub fn trailing_window(&self, position: usize, window_days: usize) -> RangeInclusive<usize> {
        let start = position.saturating_sub(window_days.saturating_sub(1));
        let end = position.min(self.dates.len() - 1);
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn default_deployment_range_has_21_days() {
        let horizon = Horizon::from_range(date("2024-09-17"), date("2024-10-07")).unwrap();
        assert_eq!(horizon.len(), 21);
        assert_eq!(horizon.position(&date("2024-09-30")), Some(13));
        assert_eq!(horizon.end(), date("2024-10-07"));
        assert_eq!(horizon.position(&date("2024-10-08")), None);
    }

    #[test]
    fn rejects_gaps_and_inverted_ranges() {
        assert!(matches!(Horizon::new(vec![]), Err(RotaError::EmptyHorizon)));
        assert!(matches!(
            Horizon::new(vec![date("2024-09-17"), date("2024-09-19")]),
            Err(RotaError::NonContiguousHorizon { .. })
        ));
        assert!(matches!(
            Horizon::new(vec![date("2024-09-17"), date("2024-09-17")]),
            Err(RotaError::NonContiguousHorizon { .. })
        ));
        assert!(matches!(
            Horizon::from_range(date("2024-09-18"), date("2024-09-17")),
            Err(RotaError::InvertedRange { .. })
        ));
    }

    #[test]
    fn trailing_windows_clip_at_the_start() {
        let horizon = Horizon::from_range(date("2024-09-17"), date("2024-10-07")).unwrap();
        assert_eq!(horizon.trailing_window(0, 7), 0..=0);
        assert_eq!(horizon.trailing_window(3, 7), 0..=3);
        assert_eq!(horizon.trailing_window(6, 7), 0..=6);
        assert_eq!(horizon.trailing_window(20, 7), 14..=20);
    }
}
