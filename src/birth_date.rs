use std::{fmt, str::FromStr};

/// A validated calendar date, as entered on the input screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BirthDate {
    day: u8,
    month: u8,
    year: u16,
}

impl BirthDate {
    pub(crate) fn new(day: u8, month: u8, year: u16) -> Result<Self, BirthDateError> {
        if !(1..=12).contains(&month) {
            return Err(BirthDateError::InvalidMonth(month));
        }
        let days = days_in_month(month, year);
        if day == 0 || day > days {
            return Err(BirthDateError::InvalidDay { day, month, days });
        }
        Ok(Self { day, month, year })
    }

    #[cfg(test)]
    pub(crate) fn day(&self) -> u8 {
        self.day
    }

    /// Month in 1..=12.
    pub(crate) fn month(&self) -> u8 {
        self.month
    }

    #[cfg(test)]
    pub(crate) fn year(&self) -> u16 {
        self.year
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl FromStr for BirthDate {
    type Err = BirthDateError;

    /// Parses `DD/MM/YYYY`. Dashes and dots are accepted as separators too.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let parts: Vec<&str> = input.split(['/', '-', '.']).collect();
        let [day, month, year] = parts[..] else {
            return Err(BirthDateError::Format(input.to_string()));
        };
        let number = |part: &str| -> Result<u16, BirthDateError> {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(BirthDateError::Format(input.to_string()));
            }
            part.parse().map_err(|_| BirthDateError::Format(input.to_string()))
        };
        if year.len() != 4 || day.len() > 2 || month.len() > 2 {
            return Err(BirthDateError::Format(input.to_string()));
        }
        Self::new(number(day)? as u8, number(month)? as u8, number(year)?)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BirthDateError {
    #[error("'{0}' is not a DD/MM/YYYY date")]
    Format(String),

    #[error("there is no month {0}")]
    InvalidMonth(u8),

    #[error("month {month} has {days} days, {day} is out of range")]
    InvalidDay { day: u8, month: u8, days: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::slashes("15/03/1990", 15, 3, 1990)]
    #[case::dashes("1-12-2001", 1, 12, 2001)]
    #[case::dots(" 07.07.1977 ", 7, 7, 1977)]
    #[case::leap_day("29/02/2000", 29, 2, 2000)]
    #[case::leap_day_2024("29/02/2024", 29, 2, 2024)]
    fn valid(#[case] input: &str, #[case] day: u8, #[case] month: u8, #[case] year: u16) {
        let date: BirthDate = input.parse().expect("parse failed");
        assert_eq!((date.day(), date.month(), date.year()), (day, month, year));
    }

    #[rstest]
    #[case::empty("")]
    #[case::two_parts("15/03")]
    #[case::letters("aa/bb/cccc")]
    #[case::short_year("15/03/90")]
    #[case::signed("+1/03/1990")]
    #[case::long_day("015/03/1990")]
    fn malformed(#[case] input: &str) {
        assert!(matches!(input.parse::<BirthDate>(), Err(BirthDateError::Format(_))));
    }

    #[rstest]
    #[case::month_zero("10/00/1990", BirthDateError::InvalidMonth(0))]
    #[case::month_thirteen("10/13/1990", BirthDateError::InvalidMonth(13))]
    #[case::day_zero("00/05/1990", BirthDateError::InvalidDay { day: 0, month: 5, days: 31 })]
    #[case::april_31("31/04/1990", BirthDateError::InvalidDay { day: 31, month: 4, days: 30 })]
    #[case::not_leap("29/02/1900", BirthDateError::InvalidDay { day: 29, month: 2, days: 28 })]
    #[case::not_leap_2023("29/02/2023", BirthDateError::InvalidDay { day: 29, month: 2, days: 28 })]
    fn impossible(#[case] input: &str, #[case] expected: BirthDateError) {
        assert_eq!(input.parse::<BirthDate>(), Err(expected));
    }

    #[test]
    fn display_is_zero_padded() {
        let date = BirthDate::new(3, 9, 1985).expect("invalid date");
        assert_eq!(date.to_string(), "03/09/1985");
    }
}
