//! Display formatting for table cells and the detail card

/// Population with comma thousands separators, e.g. `67391582` -> `67,391,582`
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
///
/// Counts chars rather than display columns; country data is almost entirely
/// single-width.
pub fn fit_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut fitted: String = text.chars().take(width - 1).collect();
    fitted.push('…');
    fitted
}
