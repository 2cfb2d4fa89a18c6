//! Text reports built out of loaded records.

use std::fmt;

use crate::{
    calculate_mean, convert_date, convert_f_to_c, find_max, find_min, format::round_tenth,
    format_temperature, Error, WeatherRecord,
};

/// Aggregate figures over several days, temperatures in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub days: usize,
    pub lowest: f64,
    /// Long form of the day of the lowest temperature.
    pub lowest_date: String,
    pub highest: f64,
    pub highest_date: String,
    pub average_low: f64,
    pub average_high: f64,
}

impl Overview {
    /// `None` when there is no record at all.
    pub fn from_records(records: &[WeatherRecord]) -> Result<Option<Self>, Error> {
        let lows: Vec<f64> = records.iter().map(|r| f64::from(r.min_temp_f)).collect();
        let highs: Vec<f64> = records.iter().map(|r| f64::from(r.max_temp_f)).collect();

        let (Some(lowest), Some(highest)) = (find_min(&lows), find_max(&highs)) else {
            return Ok(None);
        };

        let lows_c: Vec<f64> = lows.iter().copied().map(convert_f_to_c).collect();
        let highs_c: Vec<f64> = highs.iter().copied().map(convert_f_to_c).collect();

        Ok(Some(Self {
            days: records.len(),
            lowest: convert_f_to_c(lowest.value),
            lowest_date: convert_date(&records[lowest.index].date)?,
            highest: convert_f_to_c(highest.value),
            highest_date: convert_date(&records[highest.index].date)?,
            average_low: round_tenth(calculate_mean(&lows_c)?),
            average_high: round_tenth(calculate_mean(&highs_c)?),
        }))
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Day Overview", self.days)?;
        writeln!(
            f,
            "  The lowest temperature will be {}, and will occur on {}.",
            format_temperature(self.lowest),
            self.lowest_date
        )?;
        writeln!(
            f,
            "  The highest temperature will be {}, and will occur on {}.",
            format_temperature(self.highest),
            self.highest_date
        )?;
        writeln!(
            f,
            "  The average low this week is {}.",
            format_temperature(self.average_low)
        )?;
        writeln!(
            f,
            "  The average high this week is {}.",
            format_temperature(self.average_high)
        )
    }
}

/// The overview of all `records`, or an empty string when there is none.
pub fn generate_summary(records: &[WeatherRecord]) -> Result<String, Error> {
    Ok(Overview::from_records(records)?
        .map(|overview| overview.to_string())
        .unwrap_or_default())
}

struct Day {
    date: String,
    min: f64,
    max: f64,
}

impl Day {
    fn from_record(record: &WeatherRecord) -> Result<Self, Error> {
        Ok(Self {
            date: convert_date(&record.date)?,
            min: convert_f_to_c(record.min_temp_f),
            max: convert_f_to_c(record.max_temp_f),
        })
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---- {} ----", self.date)?;
        writeln!(f, "  Minimum Temperature: {}", format_temperature(self.min))?;
        writeln!(f, "  Maximum Temperature: {}", format_temperature(self.max))?;
        writeln!(f)
    }
}

/// One block per record, in record order.
pub fn generate_daily_summary(records: &[WeatherRecord]) -> Result<String, Error> {
    records
        .iter()
        .map(|record| Day::from_record(record).map(|day| day.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, min_temp_f: i32, max_temp_f: i32) -> WeatherRecord {
        WeatherRecord {
            date: date.to_string(),
            min_temp_f,
            max_temp_f,
        }
    }

    #[test]
    fn overview_figures() {
        let records = [record("2021-07-06", 30, 80), record("2021-07-07", 20, 90)];
        let overview = Overview::from_records(&records).unwrap().unwrap();
        assert_eq!(overview.days, 2);
        assert_eq!(overview.lowest, -6.7);
        assert_eq!(overview.lowest_date, "Wednesday 07 July 2021");
        assert_eq!(overview.highest, 32.2);
        assert_eq!(overview.highest_date, "Wednesday 07 July 2021");
        // mean of -1.1 and -6.7
        assert_eq!(overview.average_low, -3.9);
        assert_eq!(
            overview.average_high,
            round_tenth(calculate_mean(&[convert_f_to_c(80), convert_f_to_c(90)]).unwrap())
        );
    }

    #[test]
    fn averages_round_like_the_stored_value() {
        // Celsius means are 4.45 and 30.85, both stored a hair above the tie
        let records = [record("2021-07-06", 29, 107), record("2021-07-07", 51, 68)];
        let overview = Overview::from_records(&records).unwrap().unwrap();
        assert_eq!(overview.average_low, 4.5);
        assert_eq!(overview.average_high, 30.9);

        let summary = generate_summary(&records).unwrap();
        assert!(summary.contains("  The average low this week is 4.5°C.\n"));
        assert!(summary.contains("  The average high this week is 30.9°C.\n"));
    }

    #[test]
    fn ties_pick_the_later_day() {
        let records = [
            record("2021-07-06", 40, 90),
            record("2021-07-07", 40, 70),
            record("2021-07-08", 45, 90),
        ];
        let overview = Overview::from_records(&records).unwrap().unwrap();
        assert_eq!(overview.lowest_date, "Wednesday 07 July 2021");
        assert_eq!(overview.highest_date, "Thursday 08 July 2021");
    }

    #[test]
    fn summary_text() {
        let records = [record("2021-07-06", 32, 212), record("2021-07-07", 50, 68)];
        assert_eq!(
            generate_summary(&records).unwrap(),
            "2 Day Overview\n\
             \x20 The lowest temperature will be 0.0°C, and will occur on Tuesday 06 July 2021.\n\
             \x20 The highest temperature will be 100.0°C, and will occur on Tuesday 06 July 2021.\n\
             \x20 The average low this week is 5.0°C.\n\
             \x20 The average high this week is 60.0°C.\n"
        );
    }

    #[test]
    fn daily_text() {
        let records = [record("2021-07-06", 30, 80), record("2021-07-07", 20, 90)];
        assert_eq!(
            generate_daily_summary(&records).unwrap(),
            "---- Tuesday 06 July 2021 ----\n\
             \x20 Minimum Temperature: -1.1°C\n\
             \x20 Maximum Temperature: 26.7°C\n\
             \n\
             ---- Wednesday 07 July 2021 ----\n\
             \x20 Minimum Temperature: -6.7°C\n\
             \x20 Maximum Temperature: 32.2°C\n\
             \n"
        );
    }

    #[test]
    fn empty_is_blank() {
        assert_eq!(generate_summary(&[]).unwrap(), "");
        assert_eq!(generate_daily_summary(&[]).unwrap(), "");
        assert_eq!(Overview::from_records(&[]).unwrap(), None);
    }

    #[test]
    fn bad_date_fails() {
        let records = [record("2021-07-06", 30, 80), record("7th of July", 20, 90)];
        assert!(matches!(generate_summary(&records), Err(Error::Date(_))));
        assert!(matches!(
            generate_daily_summary(&records),
            Err(Error::Date(_))
        ));
    }
}
