//! Interactive prompts.
//!
//! The `parse_*` functions decide whether an answer is acceptable and have no
//! I/O. [`Prompter`] wraps any reader/writer pair and keeps asking until an
//! answer parses, so dialogs can be driven from tests with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::Weekday;
use tracing::debug;

use crate::city::City;
use crate::error::InputError;
use crate::filter::{FilterMonth, FilterSelector, parse_weekday};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const SEPARATOR: &str = "----------------------------------------";

const CITY_PROMPT: &str = "Choose a city [Chicago, New York City, Washington]: ";
const FILTER_PROMPT: &str = "How would you like to filter your data? [Month, Day, Both, None]: ";
const MONTH_PROMPT: &str = "Choose a month [January, February, March, April, May, June]: ";
const DAY_PROMPT: &str =
    "Choose a day [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]: ";
const RAW_DATA_PROMPT: &str = "\nWould you like to see 5 lines of raw data? [Yes, No]:\n";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Which time filters the user wants to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    Month,
    Day,
    Both,
    None,
}

impl FromStr for FilterChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(FilterChoice::Month),
            "day" => Ok(FilterChoice::Day),
            "both" => Ok(FilterChoice::Both),
            "none" => Ok(FilterChoice::None),
            _ => Err(InputError::FilterChoice(s.to_string())),
        }
    }
}

pub fn parse_city(s: &str) -> Result<City, InputError> {
    s.parse()
}

pub fn parse_filter_choice(s: &str) -> Result<FilterChoice, InputError> {
    s.parse()
}

pub fn parse_month(s: &str) -> Result<FilterMonth, InputError> {
    s.parse()
}

pub fn parse_day(s: &str) -> Result<Weekday, InputError> {
    parse_weekday(s)
}

pub fn parse_yes_no(s: &str) -> Result<bool, InputError> {
    match s.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(InputError::YesNo(s.to_string())),
    }
}

/// True when the error only means the input stream has ended.
pub fn is_end_of_input(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::UnexpectedEof
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes a line of text.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Output sink, for printing reports between questions.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Repeats `question` until `parse` accepts the answer, printing the
    /// rejection message after each invalid one.
    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> io::Result<T> {
        loop {
            let answer = self.read_answer(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(answer = %answer, error = ?e, "Rejected answer");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    /// Runs the city and filter dialog for one round.
    pub fn select_filters(&mut self) -> io::Result<(City, FilterSelector)> {
        self.say(GREETING)?;
        let city = self.ask(CITY_PROMPT, parse_city)?;

        let selector = match self.ask(FILTER_PROMPT, parse_filter_choice)? {
            FilterChoice::Month => FilterSelector::month(self.ask(MONTH_PROMPT, parse_month)?),
            FilterChoice::Day => FilterSelector::weekday(self.ask(DAY_PROMPT, parse_day)?),
            FilterChoice::Both => {
                let month = self.ask(MONTH_PROMPT, parse_month)?;
                let day = self.ask(DAY_PROMPT, parse_day)?;
                FilterSelector::both(month, day)
            }
            FilterChoice::None => {
                self.say("No time filter is selected\n")?;
                FilterSelector::all()
            }
        };

        self.say(SEPARATOR)?;
        Ok((city, selector))
    }

    /// Asks whether to show raw records. Re-asks on anything but yes/no.
    pub fn wants_raw_data(&mut self) -> io::Result<bool> {
        self.ask(RAW_DATA_PROMPT, parse_yes_no)
    }

    /// Only an explicit "yes" restarts; any other answer, or no input, ends.
    pub fn wants_restart(&mut self) -> io::Result<bool> {
        match self.read_answer(RESTART_PROMPT) {
            Ok(answer) => Ok(answer.trim().eq_ignore_ascii_case("yes")),
            Err(e) if is_end_of_input(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_parse_filter_choice() {
        assert_eq!(parse_filter_choice("Both"), Ok(FilterChoice::Both));
        assert_eq!(parse_filter_choice(" none "), Ok(FilterChoice::None));
        assert_eq!(
            parse_filter_choice("weekly"),
            Err(InputError::FilterChoice("weekly".to_string()))
        );
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("YES"), Ok(true));
        assert_eq!(parse_yes_no("no"), Ok(false));
        assert!(parse_yes_no("y").is_err());
    }

    #[test]
    fn test_ask_reprompts_until_valid() {
        let mut p = prompter("boston\n\nChicago\n");
        let city = p.ask(CITY_PROMPT, parse_city).unwrap();

        assert_eq!(city, City::Chicago);
        let out = transcript(p);
        assert_eq!(out.matches("Invalid city, please try again.").count(), 2);
        assert_eq!(out.matches(CITY_PROMPT).count(), 3);
    }

    #[test]
    fn test_ask_end_of_input() {
        let mut p = prompter("boston\n");
        let err = p.ask(CITY_PROMPT, parse_city).unwrap_err();
        assert!(is_end_of_input(&err));
    }

    #[test]
    fn test_select_filters_month_only() {
        let mut p = prompter("washington\nmonth\nmarch\n");
        let (city, selector) = p.select_filters().unwrap();

        assert_eq!(city, City::Washington);
        assert_eq!(selector, FilterSelector::month(FilterMonth::March));
        let out = transcript(p);
        assert!(out.starts_with(GREETING));
        assert!(out.trim_end().ends_with(SEPARATOR));
    }

    #[test]
    fn test_select_filters_day_only() {
        let mut p = prompter("new york city\nDAY\nfriday\n");
        let (_, selector) = p.select_filters().unwrap();
        assert_eq!(selector, FilterSelector::weekday(Weekday::Fri));
    }

    #[test]
    fn test_select_filters_both_with_retries() {
        let mut p = prompter("chicago\nboth\njuly\nfebruary\nfri\nsunday\n");
        let (_, selector) = p.select_filters().unwrap();

        assert_eq!(
            selector,
            FilterSelector::both(FilterMonth::February, Weekday::Sun)
        );
        let out = transcript(p);
        assert!(out.contains("Invalid month, please try again."));
        assert!(out.contains("Invalid day, please try again."));
    }

    #[test]
    fn test_select_filters_none() {
        let mut p = prompter("chicago\nnone\n");
        let (_, selector) = p.select_filters().unwrap();

        assert!(selector.is_all());
        assert!(transcript(p).contains("No time filter is selected"));
    }

    #[test]
    fn test_wants_raw_data_reprompts() {
        let mut p = prompter("maybe\nYes\nno\n");
        assert!(p.wants_raw_data().unwrap());
        assert!(!p.wants_raw_data().unwrap());
        assert!(transcript(p).contains("Not a valid choice, please try again."));
    }

    #[test]
    fn test_wants_restart() {
        assert!(prompter("yes\n").wants_restart().unwrap());
        assert!(prompter("Yes\n").wants_restart().unwrap());
        assert!(!prompter("nope\n").wants_restart().unwrap());
        assert!(!prompter("").wants_restart().unwrap());
    }
}
