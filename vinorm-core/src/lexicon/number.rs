//! Vietnamese number-to-words expansion
//!
//! Numbers are grouped into place values of a thousand; each three-digit
//! group is read with the irregular low-digit forms Vietnamese uses
//! ("mốt", "tư", "lăm", "linh") depending on the surrounding digits.

use crate::error::{CoreError, Result};
use std::collections::HashMap;

/// Digit and place-value words loaded from the number mapping table
#[derive(Debug, Clone)]
pub struct NumberTable {
    digits: [String; 10],
    ten: String,
    tens: String,
    hundred: String,
    thousand: String,
    million: String,
    billion: String,
    zero_tens: String,
    one_final: String,
    four_final: String,
    five_final: String,
    point: String,
    negative: String,
}

impl NumberTable {
    /// Build the table from parsed `key|word` entries
    pub fn from_entries(entries: &HashMap<String, String>, source: &str) -> Result<Self> {
        let take = |key: &str| -> Result<String> {
            entries
                .get(key)
                .cloned()
                .ok_or_else(|| CoreError::LexiconLoad {
                    path: source.to_string(),
                    reason: format!("missing entry '{key}'"),
                })
        };

        let mut digits: [String; 10] = Default::default();
        for (i, slot) in digits.iter_mut().enumerate() {
            *slot = take(&i.to_string())?;
        }

        Ok(Self {
            digits,
            ten: take("ten")?,
            tens: take("tens")?,
            hundred: take("hundred")?,
            thousand: take("thousand")?,
            million: take("million")?,
            billion: take("billion")?,
            zero_tens: take("zero_tens")?,
            one_final: take("one_final")?,
            four_final: take("four_final")?,
            five_final: take("five_final")?,
            point: take("point")?,
            negative: take("negative")?,
        })
    }

    /// The word for a single digit
    pub fn digit(&self, d: u8) -> &str {
        &self.digits[usize::from(d)]
    }

    /// The decimal-point word ("phẩy")
    pub fn point(&self) -> &str {
        &self.point
    }

    /// The negative-sign word ("âm")
    pub fn negative(&self) -> &str {
        &self.negative
    }

    /// Read a digit sequence one digit at a time, skipping non-digits
    pub fn read_digits(&self, raw: &str) -> String {
        let words: Vec<&str> = raw
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| self.digit(d as u8))
            .collect();
        words.join(" ")
    }

    /// Expand an unsigned integer digit string into words
    ///
    /// Handles arbitrary lengths; leading zeros are stripped first (the
    /// caller decides when a leading zero means digit-by-digit reading).
    pub fn expand_integer(&self, digits: &str) -> String {
        let stripped = digits.trim_start_matches('0');
        if stripped.is_empty() {
            return self.digits[0].clone();
        }

        let groups = split_groups(stripped);
        let top = groups.len() - 1;
        let mut parts: Vec<String> = Vec::new();
        let mut emitted = false;
        for (offset, &group) in groups.iter().enumerate() {
            let scale_idx = top - offset;
            if group == 0 {
                continue;
            }
            parts.push(self.read_group(group, emitted));
            let scale = self.scale_name(scale_idx);
            if !scale.is_empty() {
                parts.push(scale);
            }
            emitted = true;
        }
        parts.join(" ")
    }

    /// Expand a decimal number: integer part, the point word, fraction part
    ///
    /// Fraction digits with a leading zero (or more than two digits) are
    /// read one digit at a time; otherwise as a plain number.
    pub fn expand_decimal(&self, int_part: &str, frac_part: &str) -> String {
        let mut out = self.expand_integer(int_part);
        out.push(' ');
        out.push_str(&self.point);
        out.push(' ');
        out.push_str(&self.expand_fraction(frac_part));
        out
    }

    /// Read fraction digits after the decimal point
    pub fn expand_fraction(&self, frac_part: &str) -> String {
        if frac_part.starts_with('0') || frac_part.len() > 2 {
            self.read_digits(frac_part)
        } else {
            self.expand_integer(frac_part)
        }
    }

    /// Read one three-digit group
    ///
    /// `pad` is set when a higher-order group was already read, which
    /// forces the "không trăm"/"linh" padding: 1_000_005 reads as
    /// "một triệu không trăm linh năm".
    fn read_group(&self, group: u16, pad: bool) -> String {
        let h = (group / 100) as u8;
        let t = ((group / 10) % 10) as u8;
        let u = (group % 10) as u8;
        let mut parts: Vec<String> = Vec::new();

        if h > 0 {
            parts.push(format!("{} {}", self.digit(h), self.hundred));
        } else if pad && (t > 0 || u > 0) {
            parts.push(format!("{} {}", self.digits[0], self.hundred));
        }

        match t {
            0 => {
                if u > 0 {
                    if h > 0 || pad {
                        parts.push(self.zero_tens.clone());
                    }
                    parts.push(self.digit(u).to_string());
                }
            }
            1 => {
                parts.push(self.ten.clone());
                match u {
                    0 => {}
                    5 => parts.push(self.five_final.clone()),
                    _ => parts.push(self.digit(u).to_string()),
                }
            }
            _ => {
                parts.push(format!("{} {}", self.digit(t), self.tens));
                match u {
                    0 => {}
                    1 => parts.push(self.one_final.clone()),
                    4 => parts.push(self.four_final.clone()),
                    5 => parts.push(self.five_final.clone()),
                    _ => parts.push(self.digit(u).to_string()),
                }
            }
        }

        parts.join(" ")
    }

    /// Scale word for a three-digit group index (0 = units group)
    ///
    /// Indices past the billions compose: 10^12 is "nghìn tỷ",
    /// 10^18 is "tỷ tỷ".
    fn scale_name(&self, idx: usize) -> String {
        let mut name = match idx % 3 {
            1 => self.thousand.clone(),
            2 => self.million.clone(),
            _ => String::new(),
        };
        for _ in 0..idx / 3 {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(&self.billion);
        }
        name
    }
}

/// Split a digit string into three-digit groups, most significant first
fn split_groups(digits: &str) -> Vec<u16> {
    let bytes = digits.as_bytes();
    let mut groups = Vec::with_capacity(bytes.len() / 3 + 1);
    let head = bytes.len() % 3;
    if head > 0 {
        groups.push(parse_group(&bytes[..head]));
    }
    let mut i = head;
    while i < bytes.len() {
        groups.push(parse_group(&bytes[i..i + 3]));
        i += 3;
    }
    groups
}

fn parse_group(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
}
