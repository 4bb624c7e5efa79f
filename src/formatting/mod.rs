// Format number with thousands separator
pub fn format_number_with_commas(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    if n < 0 {
        result.push('-');
    }

    result.chars().rev().collect()
}

// Compact token count (e.g., "950", "12.3K", "1.2M")
pub fn format_tokens(n: i64) -> String {
    let abs = n.unsigned_abs() as f64;
    let sign = if n < 0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else {
        n.to_string()
    }
}

// Token delta with explicit sign
pub fn format_token_delta(n: i64) -> String {
    if n > 0 {
        format!("+{}", format_number_with_commas(n))
    } else {
        format_number_with_commas(n)
    }
}

// Byte size (e.g., "512 B", "4.9 KB", "1.2 MB")
pub fn format_bytes(bytes: usize) -> String {
    let value = bytes as f64;
    if value >= 1024.0 * 1024.0 {
        format!("{:.1} MB", value / (1024.0 * 1024.0))
    } else if value >= 1024.0 {
        format!("{:.1} KB", value / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// Single-line preview of free text, cut at `max_chars`
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
