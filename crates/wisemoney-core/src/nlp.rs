//! Rule-based transaction text parser
//!
//! Turns a sentence like "Spent 500 on Pizza" into a [`TransactionProposal`].
//! The rules are deliberately simple:
//! - the first number in the text is the amount (no number, no proposal)
//! - income keywords win over expense keywords; no keyword defaults to an
//!   expense at lower confidence
//! - whatever remains after stripping numbers, prepositions and keywords is the
//!   category
//!
//! Keywords match as raw substrings, so "forgot" contains "got" and counts as
//! income. Callers that show the proposal to a user should let them correct it.

use regex::Regex;
use tracing::debug;

use crate::models::{TransactionKind, TransactionProposal};

/// Keywords that mark a sentence as income
pub const INCOME_KEYWORDS: [&str; 6] = ["received", "got", "income", "salary", "deposit", "added"];

/// Keywords that mark a sentence as an expense
pub const EXPENSE_KEYWORDS: [&str; 6] = ["spent", "paid", "bought", "expense", "purchase", "cost"];

/// Prepositions stripped from the category remainder (space-delimited)
const PREPOSITIONS: [&str; 6] = [" on ", " for ", " from ", " at ", " in ", " to "];

/// Remainders that carry no category information
const CURRENCY_NOISE: [&str; 3] = ["dollars", "rupees", "rs"];

/// Category used when nothing descriptive is left
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Confidence when a keyword decided the kind
pub const KEYWORD_CONFIDENCE: f64 = 0.8;

/// Confidence when the kind fell back to expense
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Unsigned decimal with at most two fractional digits
const AMOUNT_PATTERN: &str = r"[0-9]+(?:\.[0-9]{1,2})?";

/// Parser for free-text transaction entries
#[derive(Debug, Clone)]
pub struct TransactionParser {
    amount_re: Regex,
}

impl TransactionParser {
    pub fn new() -> Self {
        Self {
            amount_re: Regex::new(AMOUNT_PATTERN).expect("valid regex"),
        }
    }

    /// Parse one line of text
    ///
    /// Returns `None` when the text contains no amount; the caller should ask
    /// the user to rephrase.
    pub fn parse(&self, text: &str) -> Option<TransactionProposal> {
        let text = text.trim().to_lowercase();

        // Digit runs too long for f64 come back as inf
        let amount = self
            .amount_re
            .find(&text)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|a| a.is_finite());
        let Some(amount) = amount else {
            debug!(text = %text, "No amount found");
            return None;
        };

        let (kind, confidence) = classify(&text);
        let category = self.extract_category(&text);

        debug!(
            kind = %kind,
            amount,
            category = %category,
            confidence,
            "Parsed transaction text"
        );

        Some(TransactionProposal {
            kind,
            amount,
            category,
            confidence,
        })
    }

    /// Strip amounts, prepositions and every keyword; title-case the rest
    fn extract_category(&self, text: &str) -> String {
        let mut clean = self.amount_re.replace_all(text, "").into_owned();

        for prep in PREPOSITIONS {
            clean = clean.replace(prep, " ");
        }

        for word in INCOME_KEYWORDS.iter().chain(EXPENSE_KEYWORDS.iter()) {
            clean = clean.replace(word, "");
        }

        let remainder = clean.split_whitespace().collect::<Vec<_>>().join(" ");

        if remainder.is_empty() || CURRENCY_NOISE.contains(&remainder.as_str()) {
            DEFAULT_CATEGORY.to_string()
        } else {
            title_case(&remainder)
        }
    }
}

impl Default for TransactionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide income vs expense from keyword presence
fn classify(text: &str) -> (TransactionKind, f64) {
    if INCOME_KEYWORDS.iter().any(|k| text.contains(k)) {
        (TransactionKind::Income, KEYWORD_CONFIDENCE)
    } else if EXPENSE_KEYWORDS.iter().any(|k| text.contains(k)) {
        (TransactionKind::Expense, KEYWORD_CONFIDENCE)
    } else {
        (TransactionKind::Expense, DEFAULT_CONFIDENCE)
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
