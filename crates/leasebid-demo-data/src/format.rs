//! Display helpers shared by every renderer.

/// Shortens `value` to its first `head` and last `tail` characters joined by
/// an ellipsis. Values that would not get shorter are returned unchanged.
#[must_use]
pub fn truncate_middle(value: &str, head: usize, tail: usize) -> String {
    let len = value.chars().count();
    if len <= head + tail + 1 {
        return value.to_owned();
    }
    let start: String = value.chars().take(head).collect();
    let end: String = value.chars().skip(len - tail).collect();
    format!("{start}…{end}")
}

/// `0x7a3F9c2E…9D62` style address.
#[must_use]
pub fn truncate_address(address: &str) -> String {
    truncate_middle(address, 6, 4)
}

/// `0xd41c9e7b…f4c2e96b` style hash or signature.
#[must_use]
pub fn truncate_hash(hash: &str) -> String {
    truncate_middle(hash, 10, 8)
}

/// Formats USDC base units (6 decimals) as `3,250.00 USDC`.
#[must_use]
pub fn format_usdc(base_units: u64) -> String {
    let whole = base_units / 1_000_000;
    let cents = (base_units % 1_000_000) / 10_000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{grouped}.{cents:02} USDC")
}
