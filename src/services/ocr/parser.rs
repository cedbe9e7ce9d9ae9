use regex::Regex;

use crate::models::tag::TagExtraction;

/// Keywords that introduce the listed (maximum retail) price
const MRP_KEYWORDS: [&str; 4] = ["mrp", "m.r.p", "max retail", "price mrp"];

/// Keywords that introduce the actual selling price
const SELL_KEYWORDS: [&str; 7] = ["sell", "sale", "sp", "selling", "offer", "now", "our price"];

/// A line mentioning any of these cannot be the product name
const NAME_SKIP_KEYWORDS: [&str; 6] = ["mrp", "sell", "price", "rs", "inr", "₹"];

/// Numeric token shared by the keyword and fallback patterns: 2-6 integer
/// digits, up to 2 decimals. Filters out stray single digits on the short
/// end and barcode fragments on the long end.
const NUMBER_PATTERN: &str = r"([0-9]{2,6}(?:\.[0-9]{1,2})?)";

/// Parse product name, MRP, and sell price from OCR text.
///
/// Best-effort and total: any field that cannot be inferred comes back as
/// `None`, and no input can make this fail. Explicit keyword matches win
/// over the fallback pool; absent keywords, the largest number on the tag
/// is taken as the MRP and the smallest as the deal price.
pub fn parse_price_tag(text: &str) -> TagExtraction {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let lower_text = text.to_lowercase();

    let mut mrp = number_after(&lower_text, &MRP_KEYWORDS);
    let mut sell_price = number_after(&lower_text, &SELL_KEYWORDS);

    // Fallback: pick numbers from the text and infer
    let candidates = numeric_candidates(&lower_text);
    if mrp.is_none() {
        // assume the highest is the MRP
        mrp = candidates.last().copied();
    }
    if sell_price.is_none() && !candidates.is_empty() {
        sell_price = if mrp.is_some() && candidates.len() > 1 {
            candidates.first().copied()
        } else {
            candidates.last().copied()
        };
    }

    TagExtraction {
        raw_text: text.trim().to_string(),
        name: guess_name_line(&lines),
        mrp,
        sell_price,
    }
}

/// Extract the first number following any of the given keywords.
///
/// Accepts an optional ":" or "-" separator and an optional rupee sign
/// between the keyword and the number. A keyword whose trailing token does
/// not parse counts as no match.
fn number_after(lower_text: &str, keywords: &[&str]) -> Option<f64> {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?:{})\s*[:\-]?\s*₹?\s*{}", alternation, NUMBER_PATTERN);
    let re = Regex::new(&pattern).unwrap();

    let captures = re.captures(lower_text)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

/// Collect every number in the text, with or without a currency prefix,
/// deduplicated and sorted ascending.
fn numeric_candidates(lower_text: &str) -> Vec<f64> {
    let pattern = format!(r"(?:rs\.?|inr|₹)?\s*{}", NUMBER_PATTERN);
    let re = Regex::new(&pattern).unwrap();

    let mut values: Vec<f64> = re
        .captures_iter(lower_text)
        .filter_map(|captures| captures.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    values
}

/// Guess the product name line.
///
/// Tags usually lead with the item name, so only the first 3 non-empty
/// lines are considered. Lines carrying a price keyword or currency token
/// are skipped; the first remaining line with at least one letter wins.
fn guess_name_line(lines: &[&str]) -> Option<String> {
    for line in lines.iter().take(3) {
        let lowered = line.to_lowercase();
        if NAME_SKIP_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            continue;
        }
        if line.chars().any(|c| c.is_ascii_alphabetic()) {
            return Some(line.trim().to_string());
        }
    }
    None
}
