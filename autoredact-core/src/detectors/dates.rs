//! dates.rs - Custom date detection.
//!
//! A custom date entry is either:
//!
//! * a concrete date (`2024-01-15`, `15/01/2024`, `January 15, 2024`, ...),
//!   which is expanded into every common way of writing that same day:
//!   numeric in Y-M-D, D-M-Y and M-D-Y order with any of `- / .` or a space
//!   as separator, with or without zero padding, two or four digit years,
//!   and with the month spelled out or abbreviated; or
//! * a format template made of `YYYY`, `YY`, `MMMM`, `MMM`, `MM`, `M`, `DD`
//!   and `D` tokens (`DD/MM/YYYY`, `MMM D, YYYY`), which matches any date
//!   written in that shape.
//!
//! An ambiguous concrete date such as `01/02/2024` expands to both readings.
//! Anything else is rejected with [`AutoRedactError::InvalidDateFormat`].
//!
//! License: MIT OR Apache-2.0

use chrono::{Datelike, NaiveDate};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

use super::{find_all, Detector};
use crate::errors::AutoRedactError;
use crate::redaction_match::{Category, Match};

/// Any single date separator.
const SEP: &str = r"[\-/.\s]";
const ORDINAL: &str = r"(?:st|nd|rd|th)?";

/// Full month name and the regex fragment for its abbreviation.
const MONTHS: [(&str, &str); 12] = [
    ("january", "jan"),
    ("february", "feb"),
    ("march", "mar"),
    ("april", "apr"),
    ("may", "may"),
    ("june", "jun"),
    ("july", "jul"),
    ("august", "aug"),
    ("september", "sept?"),
    ("october", "oct"),
    ("november", "nov"),
    ("december", "dec"),
];

/// chrono formats tried, in order, when reading a concrete date.
const CONCRETE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

fn numeric(value: u32) -> String {
    if value < 10 {
        format!("0?{}", value)
    } else {
        value.to_string()
    }
}

fn wrap(body: &str) -> String {
    format!(r"(?i)\b{}\b", body)
}

/// Every date a concrete entry could mean. Years outside 1000..=9999 are
/// discarded, which filters out `%Y` swallowing a two digit year.
pub fn parse_concrete_dates(input: &str) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for format in CONCRETE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if (1000..=9999).contains(&date.year()) && !dates.contains(&date) {
                dates.push(date);
            }
        }
    }
    dates
}

/// Patterns covering every common way of writing `date`.
pub fn concrete_patterns(date: NaiveDate) -> Vec<String> {
    let year = date.year();
    let day = numeric(date.day());
    let month = numeric(date.month());
    let any_year = format!("(?:{}|{:02})", year, year % 100);
    let (full, abbr) = MONTHS[date.month0() as usize];
    let month_name = format!(r"(?:{}|{})\.?", full, abbr);

    [
        format!("{year}{SEP}{month}{SEP}{day}"),
        format!("{day}{SEP}{month}{SEP}{any_year}"),
        format!("{month}{SEP}{day}{SEP}{any_year}"),
        format!(r"{month_name}\s+{day}{ORDINAL},?\s+{year}"),
        format!(r"{day}{ORDINAL}\s+{month_name},?\s+{year}"),
    ]
    .iter()
    .map(|body| wrap(body))
    .collect()
}

/// A template is made only of `Y`, `M` and `D` letters (any case) plus
/// separators, and names at least two of the three parts.
pub fn is_format_template(input: &str) -> bool {
    let mut kinds = HashSet::new();
    for c in input.chars() {
        if c.is_alphabetic() {
            match c.to_ascii_uppercase() {
                k @ ('Y' | 'M' | 'D') => {
                    kinds.insert(k);
                }
                _ => return false,
            }
        } else if c.is_ascii_digit() {
            return false;
        }
    }
    kinds.len() >= 2
}

fn token_fragment(input: &str, letter: char, run: usize) -> Result<String, AutoRedactError> {
    let fragment = match (letter, run) {
        ('Y', 4) => r"\d{4}".to_string(),
        ('Y', 2) => r"\d{2}".to_string(),
        ('M', 1 | 2) => "(?:0?[1-9]|1[0-2])".to_string(),
        ('M', 3) => {
            let abbrs: Vec<&str> = MONTHS.iter().map(|(_, a)| *a).collect();
            format!(r"(?:{})\.?", abbrs.join("|"))
        }
        ('M', 4) => {
            let names: Vec<&str> = MONTHS.iter().map(|(n, _)| *n).collect();
            format!("(?:{})", names.join("|"))
        }
        ('D', 1 | 2) => "(?:0?[1-9]|[12][0-9]|3[01])".to_string(),
        _ => return Err(AutoRedactError::InvalidDateFormat(input.to_string())),
    };
    Ok(fragment)
}

/// Translates a format template into one pattern.
pub fn template_pattern(input: &str) -> Result<String, AutoRedactError> {
    let chars: Vec<char> = input.chars().collect();
    let mut body = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut j = i;
        if c.is_alphabetic() {
            let letter = c.to_ascii_uppercase();
            while j < chars.len() && chars[j].to_ascii_uppercase() == letter {
                j += 1;
            }
            body.push_str(&token_fragment(input, letter, j - i)?);
        } else {
            while j < chars.len() && !chars[j].is_alphabetic() {
                j += 1;
            }
            if chars[i..j].contains(&',') {
                body.push_str(r",?\s*");
            } else {
                body.push_str(SEP);
            }
        }
        i = j;
    }

    Ok(wrap(&body))
}

/// Expands a custom date entry into the regex sources that detect it.
pub fn expand_date_patterns(input: &str) -> Result<Vec<String>, AutoRedactError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AutoRedactError::InvalidDateFormat(input.to_string()));
    }

    if is_format_template(input) {
        return Ok(vec![template_pattern(input)?]);
    }

    let dates = parse_concrete_dates(input);
    if dates.is_empty() {
        return Err(AutoRedactError::InvalidDateFormat(input.to_string()));
    }

    let mut seen = HashSet::new();
    let patterns: Vec<String> = dates
        .into_iter()
        .flat_map(concrete_patterns)
        .filter(|p| seen.insert(p.clone()))
        .collect();
    debug!("Custom date '{}' expanded into {} patterns.", input, patterns.len());
    Ok(patterns)
}

#[derive(Debug)]
pub struct DateDetector {
    rule_id: String,
    patterns: Vec<Regex>,
}

impl DateDetector {
    pub fn new(date: &str, rule_id: String) -> Result<Self, AutoRedactError> {
        let patterns = expand_date_patterns(date)?
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AutoRedactError::RuleCompilation(rule_id.clone(), e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rule_id, patterns })
    }
}

impl Detector for DateDetector {
    fn rule_id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> Category {
        Category::CustomDate
    }

    fn detect(&self, text: &str) -> Vec<Match> {
        let mut seen = HashSet::new();
        let mut found: Vec<Match> = self
            .patterns
            .iter()
            .flat_map(|re| find_all(re, text, Category::CustomDate, &self.rule_id))
            .filter(|m| seen.insert((m.start, m.text.clone())))
            .collect();
        found.sort_by_key(|m| (m.start, m.end));
        found
    }
}
