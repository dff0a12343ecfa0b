use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Serialize;
use std::str::FromStr;

use crate::error::GenericError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
/// The pad never holds more than this many characters.
pub const PAD_CAPACITY: usize = 3;

const INVALID_SCORE: &str = "Score must be between 0 and 10 with at most one decimal place";

lazy_static! {
    static ref PAD_TEXT: Regex = Regex::new(r"^\d{1,2}(\.\d)?$").expect("static regex");
}

/// A judge's award for a single dive: within 0 to 10, in steps of a tenth at most.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct JudgeScore(f64);

impl JudgeScore {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for JudgeScore {
    type Error = GenericError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let tenths = value * 10.0;
        if !value.is_finite()
            || !(MIN_SCORE..=MAX_SCORE).contains(&value)
            || (tenths - tenths.round()).abs() > 1e-9
        {
            return Err(GenericError::BadRequest(INVALID_SCORE));
        }
        Ok(Self((tenths.round()) / 10.0))
    }
}

impl FromStr for JudgeScore {
    type Err = GenericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !PAD_TEXT.is_match(s) {
            return Err(GenericError::BadRequest(INVALID_SCORE));
        }
        let value = s
            .parse::<f64>()
            .map_err(|_| GenericError::BadRequest(INVALID_SCORE))?;
        Self::try_from(value)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of the counting scores. Panels of five or more drop their single highest and lowest.
pub fn raw_total(scores: &[f64]) -> f64 {
    if scores.len() < 3 {
        return 0.0;
    }
    let sorted = scores.iter().copied().sorted_by(f64::total_cmp).collect_vec();
    let counting = if sorted.len() >= 5 {
        &sorted[1..sorted.len() - 1]
    } else {
        &sorted[..]
    };
    round_to_hundredths(counting.iter().sum())
}

pub fn dive_total(scores: &[f64], difficulty: f64) -> f64 {
    round_to_hundredths(raw_total(scores) * difficulty)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKey {
    Digit(u8),
    Decimal,
    Backspace,
    Clear,
}

/// Keypad buffer of the judge page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JudgePad {
    buffer: String,
    submitted: bool,
}

impl JudgePad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// What the pad shows: the typed text, or `0.0` before anything is typed.
    pub fn display(&self) -> &str {
        if self.buffer.is_empty() {
            "0.0"
        } else {
            &self.buffer
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn press(&mut self, key: PadKey) {
        match key {
            PadKey::Clear => {
                self.buffer.clear();
                self.submitted = false;
            }
            _ if self.submitted => {}
            PadKey::Digit(digit) => self.push_digit(digit),
            PadKey::Decimal => {
                if !self.buffer.is_empty() && !self.buffer.contains('.') {
                    self.buffer.push('.');
                }
            }
            PadKey::Backspace => {
                self.buffer.pop();
            }
        }
    }

    fn push_digit(&mut self, digit: u8) {
        let Some(digit) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.buffer.len() >= PAD_CAPACITY {
            return;
        }
        if self.buffer == "0" {
            self.buffer = digit.to_string();
            return;
        }
        if let Some((_, decimals)) = self.buffer.split_once('.') {
            if !decimals.is_empty() {
                return;
            }
        }
        self.buffer.push(digit);
    }

    /// Parses the buffer and locks the pad until it is cleared.
    pub fn submit(&mut self) -> Result<JudgeScore, GenericError> {
        if self.submitted {
            return Err(GenericError::Conflict("Score already submitted"));
        }
        let score = self.buffer.parse::<JudgeScore>()?;
        self.submitted = true;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(pad: &mut JudgePad, keys: &str) {
        for c in keys.chars() {
            match c {
                '.' => pad.press(PadKey::Decimal),
                '<' => pad.press(PadKey::Backspace),
                'c' => pad.press(PadKey::Clear),
                d => pad.press(PadKey::Digit(d.to_digit(10).unwrap() as u8)),
            }
        }
    }

    #[test]
    fn pad_text_is_validated() {
        for ok in ["0", "8", "8.5", "10", "10.0", "9.9"] {
            assert!(ok.parse::<JudgeScore>().is_ok(), "{ok} should be accepted");
        }
        for bad in ["", ".", "8.", "8.55", "10.5", "-1", "abc", "11", "1e1"] {
            assert!(bad.parse::<JudgeScore>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn numeric_scores_are_validated() {
        assert_eq!(JudgeScore::try_from(7.5).unwrap().value(), 7.5);
        assert!(JudgeScore::try_from(10.1).is_err());
        assert!(JudgeScore::try_from(-0.1).is_err());
        assert!(JudgeScore::try_from(6.25).is_err());
        assert!(JudgeScore::try_from(f64::NAN).is_err());
    }

    #[test]
    fn small_panels_score_zero() {
        assert_eq!(raw_total(&[]), 0.0);
        assert_eq!(raw_total(&[7.0, 8.0]), 0.0);
    }

    #[test]
    fn three_judges_all_count() {
        assert_eq!(raw_total(&[7.0, 7.5, 8.0]), 22.5);
    }

    #[test]
    fn five_judges_drop_high_and_low() {
        assert_eq!(raw_total(&[6.0, 7.0, 7.5, 8.0, 9.5]), 22.5);
        assert_eq!(dive_total(&[6.0, 7.0, 7.5, 8.0, 9.5], 2.4), 54.0);
    }

    #[test]
    fn totals_are_rounded_to_hundredths() {
        assert_eq!(dive_total(&[6.5, 7.0, 7.0], 1.3), 26.65);
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut pad = JudgePad::new();
        type_keys(&mut pad, "07");
        assert_eq!(pad.buffer(), "7");
    }

    #[test]
    fn pad_limits_length_and_decimals() {
        let mut pad = JudgePad::new();
        type_keys(&mut pad, ".");
        assert_eq!(pad.display(), "0.0");
        type_keys(&mut pad, "8.55");
        assert_eq!(pad.buffer(), "8.5");
        type_keys(&mut pad, "c1000");
        assert_eq!(pad.buffer(), "100");
        assert!(pad.submit().is_err());
        assert!(!pad.is_submitted());
    }

    #[test]
    fn submitted_pad_is_locked_until_cleared() {
        let mut pad = JudgePad::new();
        type_keys(&mut pad, "9.5");
        assert_eq!(pad.submit().unwrap().value(), 9.5);
        type_keys(&mut pad, "<1");
        assert_eq!(pad.buffer(), "9.5");
        assert!(pad.submit().is_err());
        type_keys(&mut pad, "c6");
        assert_eq!(pad.buffer(), "6");
        assert!(!pad.is_submitted());
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut pad = JudgePad::new();
        type_keys(&mut pad, "8.5<<");
        assert_eq!(pad.buffer(), "8");
    }
}
