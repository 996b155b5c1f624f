use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;

use super::models::{DailySummary, ForecastOutlook, ForecastSample, TrendSummary};
use crate::icons;

/// Maximum number of daily summaries produced
pub const MAX_FORECAST_DAYS: usize = 5;

/// Groups 3-hour samples into local calendar days and derives the trend.
#[derive(Debug, Clone, Copy)]
pub struct ForecastAggregator {
    timezone: Tz,
}

struct DayAccumulator {
    temp_min: f64,
    temp_max: f64,
    icon: String,
    description: String,
}

impl DayAccumulator {
    fn new(first: &ForecastSample) -> Self {
        Self {
            temp_min: first.temperature,
            temp_max: first.temperature,
            icon: first.icon.clone(),
            description: first.description.clone(),
        }
    }

    fn add(&mut self, temperature: f64) {
        self.temp_min = self.temp_min.min(temperature);
        self.temp_max = self.temp_max.max(temperature);
    }

    fn into_summary(self, date: NaiveDate) -> DailySummary {
        DailySummary {
            date,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            icon_style: icons::classify(&self.icon),
            icon: self.icon,
            description: self.description,
        }
    }
}

#[derive(Default)]
struct TrendAccumulator {
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    counts: IndexMap<String, usize>,
    leader: Option<usize>,
    leader_count: usize,
    samples: usize,
}

impl TrendAccumulator {
    fn add(&mut self, sample: &ForecastSample) {
        let t = sample.temperature;
        self.temp_min = Some(self.temp_min.map_or(t, |m| m.min(t)));
        self.temp_max = Some(self.temp_max.map_or(t, |m| m.max(t)));
        self.samples += 1;

        let index = match self.counts.get_index_of(&sample.condition) {
            Some(index) => index,
            None => self.counts.insert_full(sample.condition.clone(), 0).0,
        };
        let count = &mut self.counts[index];
        *count += 1;

        // Strictly greater: a category that merely ties never takes the lead
        if *count > self.leader_count {
            self.leader_count = *count;
            self.leader = Some(index);
        }
    }

    fn finish(self, days_covered: usize) -> TrendSummary {
        let most_frequent = self
            .leader
            .and_then(|index| self.counts.get_index(index))
            .map(|(category, _)| category.clone())
            .unwrap_or_default();

        TrendSummary {
            temp_min: self.temp_min.unwrap_or_default(),
            temp_max: self.temp_max.unwrap_or_default(),
            most_frequent,
            sample_count: self.samples,
            days_covered,
        }
    }
}

impl ForecastAggregator {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Local calendar date of an instant in the aggregator's timezone
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Aggregate samples (pre-sorted by timestamp) into at most
    /// [`MAX_FORECAST_DAYS`] daily summaries plus a trend over every sample
    /// not falling on `today`.
    ///
    /// Days keep first-encountered order; each day's icon and description come
    /// from its first sample.
    pub fn aggregate(&self, samples: &[ForecastSample], today: NaiveDate) -> ForecastOutlook {
        let mut days: IndexMap<NaiveDate, DayAccumulator> = IndexMap::new();
        let mut trend = TrendAccumulator::default();

        for sample in samples {
            let date = self.local_date(sample.timestamp);
            if date == today {
                continue;
            }

            days.entry(date)
                .and_modify(|day| day.add(sample.temperature))
                .or_insert_with(|| DayAccumulator::new(sample));
            trend.add(sample);
        }

        let days: Vec<DailySummary> = days
            .into_iter()
            .take(MAX_FORECAST_DAYS)
            .map(|(date, day)| day.into_summary(date))
            .collect();

        let trend = trend.finish(days.len());

        tracing::debug!(
            days = days.len(),
            samples = trend.sample_count,
            most_frequent = %trend.most_frequent,
            "Forecast aggregated"
        );

        ForecastOutlook { days, trend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const DAY_TEMPS: [f64; 8] = [10.0, 12.0, 15.0, 18.0, 20.0, 17.0, 14.0, 11.0];

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
    }

    fn sample(at: DateTime<Utc>, temp: f64, condition: &str, icon: &str) -> ForecastSample {
        ForecastSample {
            timestamp: at,
            temperature: temp,
            condition: condition.to_string(),
            description: format!("{} description", condition.to_lowercase()),
            icon: icon.to_string(),
        }
    }

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
    }

    /// 8 samples per day, 3 hours apart, starting at `first_day` midnight UTC
    fn days_of_samples(first_day: NaiveDate, day_count: i64) -> Vec<ForecastSample> {
        let start = midnight(first_day);
        (0..day_count * 8)
            .map(|slot| {
                let temp = DAY_TEMPS[(slot % 8) as usize];
                sample(start + Duration::hours(3 * slot), temp, "Clouds", "04d")
            })
            .collect()
    }

    fn utc_aggregator() -> ForecastAggregator {
        ForecastAggregator::new(chrono_tz::UTC)
    }

    #[test]
    fn test_five_days_of_clouds_with_one_rain_sample() {
        let mut samples = days_of_samples(today() + Duration::days(1), 5);
        // Day 3, fourth slot
        samples[2 * 8 + 3].condition = "Rain".to_string();

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert_eq!(outlook.days.len(), 5);
        assert_eq!(outlook.trend.temp_min, 10.0);
        assert_eq!(outlook.trend.temp_max, 20.0);
        assert_eq!(outlook.trend.most_frequent, "Clouds");
        assert_eq!(outlook.trend.sample_count, 40);
        assert_eq!(outlook.trend.days_covered, 5);
        for day in &outlook.days {
            assert_eq!(day.temp_min, 10.0);
            assert_eq!(day.temp_max, 20.0);
        }
    }

    #[test]
    fn test_today_is_always_excluded() {
        let mut samples = days_of_samples(today(), 1);
        samples.extend(days_of_samples(today() + Duration::days(1), 2));

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert_eq!(outlook.days.len(), 2);
        assert!(outlook.days.iter().all(|d| d.date != today()));
        assert_eq!(outlook.trend.sample_count, 16);
    }

    #[test]
    fn test_only_today_yields_empty_outlook() {
        let samples = days_of_samples(today(), 1);

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert!(outlook.days.is_empty());
        assert_eq!(outlook.trend.sample_count, 0);
        assert!(outlook.trend.is_empty());
        assert!(outlook.trend.text().is_none());
    }

    #[test]
    fn test_empty_input() {
        let outlook = utc_aggregator().aggregate(&[], today());
        assert!(outlook.days.is_empty());
        assert!(outlook.trend.is_empty());
    }

    #[test]
    fn test_caps_at_five_days_but_trend_covers_all_samples() {
        let mut samples = days_of_samples(today() + Duration::days(1), 6);
        // Only the sixth day carries the extremes
        samples[5 * 8].temperature = -4.0;
        samples[5 * 8 + 1].temperature = 31.5;

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert_eq!(outlook.days.len(), MAX_FORECAST_DAYS);
        assert_eq!(
            outlook.days.last().map(|d| d.date),
            Some(today() + Duration::days(5))
        );
        assert_eq!(outlook.trend.temp_min, -4.0);
        assert_eq!(outlook.trend.temp_max, 31.5);
        assert_eq!(outlook.trend.sample_count, 48);
        assert_eq!(outlook.trend.days_covered, 5);
    }

    #[test]
    fn test_representative_condition_is_first_sample_of_day() {
        let start = midnight(today() + Duration::days(1));
        let samples = vec![
            sample(start, 9.0, "Clear", "01n"),
            sample(start + Duration::hours(3), 11.0, "Rain", "10d"),
            sample(start + Duration::hours(6), 12.0, "Rain", "10d"),
            sample(start + Duration::hours(9), 13.0, "Rain", "10d"),
        ];

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert_eq!(outlook.days.len(), 1);
        let day = &outlook.days[0];
        assert_eq!(day.icon, "01n");
        assert_eq!(day.description, "clear description");
        assert_eq!(day.icon_style, icons::classify("01n"));
        assert_eq!(day.temp_min, 9.0);
        assert_eq!(day.temp_max, 13.0);
        // The trend still counts the majority
        assert_eq!(outlook.trend.most_frequent, "Rain");
    }

    #[test]
    fn test_tie_goes_to_first_category_reaching_top_count() {
        let start = midnight(today() + Duration::days(1));
        let order = ["Clouds", "Rain", "Rain", "Rain", "Clouds", "Clouds"];
        let samples: Vec<_> = order
            .iter()
            .enumerate()
            .map(|(i, c)| sample(start + Duration::hours(3 * i as i64), 15.0, c, "04d"))
            .collect();

        let outlook = utc_aggregator().aggregate(&samples, today());

        // Clouds is seen first, but Rain reaches 3 first
        assert_eq!(outlook.trend.most_frequent, "Rain");
    }

    #[test]
    fn test_tie_with_first_seen_category_reaching_first() {
        let start = midnight(today() + Duration::days(1));
        let order = ["Snow", "Snow", "Mist", "Mist"];
        let samples: Vec<_> = order
            .iter()
            .enumerate()
            .map(|(i, c)| sample(start + Duration::hours(3 * i as i64), -1.0, c, "13d"))
            .collect();

        let outlook = utc_aggregator().aggregate(&samples, today());

        assert_eq!(outlook.trend.most_frequent, "Snow");
    }

    #[test]
    fn test_days_are_grouped_in_local_timezone() {
        // 22:00 UTC on the 18th is already the 19th in Tokyo (UTC+9)
        let late = Utc
            .with_ymd_and_hms(2026, 10, 18, 22, 0, 0)
            .single()
            .expect("valid instant");
        let samples = vec![sample(late, 16.0, "Clear", "01n")];

        let utc = utc_aggregator().aggregate(&samples, today());
        assert!(utc.days.is_empty());

        let tokyo = ForecastAggregator::new(chrono_tz::Asia::Tokyo).aggregate(&samples, today());
        assert_eq!(tokyo.days.len(), 1);
        assert_eq!(tokyo.days[0].date, today() + Duration::days(1));
    }

    #[test]
    fn test_local_date() {
        let instant = Utc
            .with_ymd_and_hms(2026, 10, 18, 3, 0, 0)
            .single()
            .expect("valid instant");
        let aggregator = ForecastAggregator::new(chrono_tz::America::Chicago);
        assert_eq!(
            aggregator.local_date(instant),
            NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
        );
    }
}
