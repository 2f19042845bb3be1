//! Date parsing shared by the codec and the canonicalizer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DataError, Result};
use crate::schema::{DATE_FORMAT, DISPLAY_DATETIME_FORMAT};

/// Parses either the canonical `YYYY-MM-DD` form or the `YYYY-MM-DD HH:MM:SS` display form.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(_) => NaiveDateTime::parse_from_str(value, DISPLAY_DATETIME_FORMAT)
            .map(|datetime| datetime.date())
            .map_err(|source| DataError::InvalidDate {
                value: value.to_string(),
                source,
            }),
    }
}

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Midnight of `date` in the display form used inside value cells.
pub fn to_display(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .format(DISPLAY_DATETIME_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2021, 5, 5).unwrap();
        assert_eq!(parse_date("2021-05-05").unwrap(), expected);
        assert_eq!(parse_date(" 2021-05-05 13:45:00 ").unwrap(), expected);
    }

    #[test]
    fn rejects_other_layouts() {
        let err = parse_date("05/05/2021").unwrap_err();
        assert!(matches!(err, DataError::InvalidDate { ref value, .. } if value == "05/05/2021"));
    }

    #[test]
    fn renders_display_form_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(to_display(date), "2022-01-01 00:00:00");
        assert_eq!(to_canonical(date), "2022-01-01");
    }
}
