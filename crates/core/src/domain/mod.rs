pub mod comparison;
pub mod records;

/// Trims and uppercases a ticker symbol. Returns `None` for blank input.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return None;
    }
    Some(ticker.to_uppercase())
}
