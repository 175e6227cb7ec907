use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    pub title: String,
    pub page_number: i64,
}

/// Splits a raw TOC row into its title and the page number printed at the
/// end of it.
///
/// The page number is the longest run of digits at the end of the trimmed
/// row, optionally preceded by `-`. Rows without such a run keep their full
/// text as the title and get page 0. Never fails.
pub fn parse_line(raw: &str) -> ParsedLine {
    let trimmed = raw.trim();

    let Some((prefix, suffix)) = split_numeric_suffix(trimmed) else {
        return ParsedLine {
            title: trimmed.to_string(),
            page_number: 0,
        };
    };

    ParsedLine {
        title: prefix.trim_end_matches([' ', '.', '-']).to_string(),
        page_number: parse_signed_digits(suffix),
    }
}

fn split_numeric_suffix(input: &str) -> Option<(&str, &str)> {
    let digits_start = input
        .char_indices()
        .rev()
        .take_while(|(_, ch)| digit_value(*ch).is_some())
        .last()
        .map(|(idx, _)| idx)?;

    let start = match input[..digits_start].strip_suffix('-') {
        Some(rest) => rest.len(),
        None => digits_start,
    };

    Some((&input[..start], &input[start..]))
}

fn parse_signed_digits(suffix: &str) -> i64 {
    let (negative, digits) = match suffix.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, suffix),
    };

    let magnitude = digits
        .chars()
        .filter_map(digit_value)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit))
        });

    if negative { -magnitude } else { magnitude }
}

// ASCII and full-width digits; the latter show up in CJK retailer listings.
fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => ch.to_digit(10),
        '\u{ff10}'..='\u{ff19}' => Some(ch as u32 - 0xff10),
        _ => None,
    }
}
