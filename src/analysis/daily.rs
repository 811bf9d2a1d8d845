//! Group-by-date averaging.
//!
//! Rows are bucketed by the leading characters of their `datetime` cell and
//! each bucket keeps a running sum and count per numeric column. Averages
//! are divided out and rounded once every row has been seen.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::rounding::round_half_up;
use crate::model::{DailyAverage, Observation, DATE_KEY_LEN};

/// Running totals for one date key.
#[derive(Debug, Default, Clone)]
struct Accumulator {
    temp_sum: f64,
    temp_count: usize,
    dew_sum: f64,
    dew_count: usize,
}

impl Accumulator {
    fn push(&mut self, obs: &Observation) {
        if let Some(t) = obs.temperature {
            self.temp_sum += t;
            self.temp_count += 1;
        }
        if let Some(d) = obs.dewpoint {
            self.dew_sum += d;
            self.dew_count += 1;
        }
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// The first `len` characters of `datetime`.
///
/// Strings shorter than `len` are returned whole; no validation is done.
pub fn date_key(datetime: &str, len: usize) -> String {
    datetime.chars().take(len).collect()
}

/// Averages temperature and dew point per date key.
///
/// Output is ordered by date key, with the blank-`datetime` group (if any)
/// first. Each average is rounded HALF_UP to `decimals` places.
pub fn daily_averages(
    observations: &[Observation],
    key_len: usize,
    decimals: usize,
) -> Vec<DailyAverage> {
    let mut groups: BTreeMap<Option<String>, Accumulator> = BTreeMap::new();

    for obs in observations {
        let key = obs.datetime.as_deref().map(|dt| date_key(dt, key_len));
        groups.entry(key).or_default().push(obs);
    }

    groups
        .into_iter()
        .map(|(date, acc)| DailyAverage {
            date,
            avg_temp: mean(acc.temp_sum, acc.temp_count).map(|v| round_half_up(v, decimals)),
            avg_dewpoint: mean(acc.dew_sum, acc.dew_count).map(|v| round_half_up(v, decimals)),
        })
        .collect()
}

/// Date keys shorter than `key_len` characters or, for the default
/// 8-character key, not a valid `YYYYMMDD` calendar date.
///
/// Only used for diagnostics; such keys are still grouped and written.
pub fn malformed_date_keys(days: &[DailyAverage], key_len: usize) -> Vec<String> {
    days.iter()
        .filter_map(|day| day.date.as_deref())
        .filter(|key| {
            key.chars().count() != key_len
                || (key_len == DATE_KEY_LEN && NaiveDate::parse_from_str(key, "%Y%m%d").is_err())
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(datetime: &str, temperature: f64, dewpoint: f64) -> Observation {
        Observation {
            datetime: Some(datetime.to_string()),
            temperature: Some(temperature),
            dewpoint: Some(dewpoint),
        }
    }

    #[test]
    fn test_date_key_takes_prefix() {
        assert_eq!(date_key("202301010600", 8), "20230101");
        assert_eq!(date_key("20230101", 8), "20230101");
    }

    #[test]
    fn test_short_datetime_is_kept_whole() {
        assert_eq!(date_key("2023", 8), "2023");
        assert_eq!(date_key("", 8), "");
    }

    #[test]
    fn test_daily_averages_two_days() {
        let rows = vec![
            obs("202301010000", 10.0, 5.0),
            obs("202301010600", 12.0, 7.0),
            obs("202301020000", 20.0, 15.0),
        ];

        let days = daily_averages(&rows, 8, 2);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.as_deref(), Some("20230101"));
        assert_eq!(days[0].avg_temp, Some(11.0));
        assert_eq!(days[0].avg_dewpoint, Some(6.0));
        assert_eq!(days[1].date.as_deref(), Some("20230102"));
        assert_eq!(days[1].combined_result(), "20.0, 15.0");
    }

    #[test]
    fn test_averages_are_rounded() {
        let rows = vec![
            obs("202301010000", 10.0, 1.0),
            obs("202301010100", 10.0, 1.0),
            obs("202301010200", 11.0, 2.0),
        ];

        let days = daily_averages(&rows, 8, 2);

        assert_eq!(days[0].avg_temp, Some(10.33));
        assert_eq!(days[0].avg_dewpoint, Some(1.33));
    }

    #[test]
    fn test_missing_values_are_excluded_from_mean() {
        let rows = vec![
            obs("202301010000", 10.0, 4.0),
            Observation {
                datetime: Some("202301011200".to_string()),
                temperature: None,
                dewpoint: Some(6.0),
            },
        ];

        let days = daily_averages(&rows, 8, 2);

        assert_eq!(days[0].avg_temp, Some(10.0));
        assert_eq!(days[0].avg_dewpoint, Some(5.0));
    }

    #[test]
    fn test_blank_datetime_forms_its_own_group_first() {
        let rows = vec![
            obs("202301010000", 10.0, 4.0),
            Observation {
                datetime: None,
                temperature: Some(3.0),
                dewpoint: None,
            },
        ];

        let days = daily_averages(&rows, 8, 2);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, None);
        assert_eq!(days[0].avg_dewpoint, None);
        assert_eq!(days[0].combined_result(), "3.0");
    }

    #[test]
    fn test_each_key_appears_once() {
        let rows: Vec<Observation> = (0..24)
            .map(|h| obs(&format!("20230105{:02}00", h), h as f64, 0.0))
            .chain((0..3).map(|h| obs(&format!("20230104{:02}00", h), 1.0, 1.0)))
            .collect();

        let days = daily_averages(&rows, 8, 2);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.as_deref(), Some("20230104"));
        assert_eq!(days[1].avg_temp, Some(11.5));
    }

    #[test]
    fn test_empty_input_gives_no_days() {
        assert!(daily_averages(&[], 8, 2).is_empty());
    }

    #[test]
    fn test_malformed_date_keys() {
        let rows = vec![
            obs("202301010000", 1.0, 1.0),
            obs("20231301", 1.0, 1.0),
            obs("2023", 1.0, 1.0),
        ];
        let days = daily_averages(&rows, 8, 2);

        let bad = malformed_date_keys(&days, 8);
        assert_eq!(bad, vec!["2023".to_string(), "20231301".to_string()]);
    }

    #[test]
    fn test_shorter_configured_key_is_not_flagged() {
        let rows = vec![obs("202301010000", 1.0, 1.0), obs("2023", 1.0, 1.0)];
        let days = daily_averages(&rows, 6, 2);

        assert_eq!(days[1].date.as_deref(), Some("202301"));
        assert_eq!(malformed_date_keys(&days, 6), vec!["2023".to_string()]);
    }
}
