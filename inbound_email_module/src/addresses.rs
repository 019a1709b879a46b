use tracing::debug;

/// Split a comma-separated address header into individual entries.
///
/// Commas inside a quoted display name or inside an angle-bracket address
/// do not split. Entries are trimmed with their internal formatting kept
/// as received. A structurally broken value (unmatched double quote,
/// unclosed angle bracket) yields an empty list for the whole field rather
/// than a partial split.
pub fn split_addresses(raw: Option<&str>) -> Vec<String> {
    let Some(value) = raw else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for ch in value.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
                current.push(ch);
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '<' if !in_quotes => {
                in_brackets = true;
                current.push(ch);
            }
            '>' if !in_quotes => {
                in_brackets = false;
                current.push(ch);
            }
            ',' if !in_quotes && !in_brackets => {
                push_entry(&mut out, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if in_quotes || in_brackets {
        debug!("discarding unparseable address list: {}", value);
        return Vec::new();
    }

    push_entry(&mut out, &current);
    out
}

fn push_entry(out: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Extract the routing address from a formatted entry.
///
/// `"Ann Example" <ann@example.com>` and `<ann@example.com>` both yield
/// `ann@example.com`; a bare address passes through unchanged. No case
/// folding or other normalization is applied.
pub fn address_part(entry: &str) -> &str {
    if let Some(start) = entry.rfind('<') {
        if let Some(len) = entry[start + 1..].find('>') {
            return entry[start + 1..start + 1 + len].trim();
        }
    }
    entry.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_outside_quotes() {
        let raw = "\"Smith, John\" <a@b.com>, b@c.com";
        assert_eq!(
            split_addresses(Some(raw)),
            vec!["\"Smith, John\" <a@b.com>", "b@c.com"]
        );
    }

    #[test]
    fn keeps_entry_formatting_as_received() {
        let raw = "Foo bar <foo@example.com>,  <no-name@example.com> , plain@example.com";
        assert_eq!(
            split_addresses(Some(raw)),
            vec![
                "Foo bar <foo@example.com>",
                "<no-name@example.com>",
                "plain@example.com"
            ]
        );
    }

    #[test]
    fn absent_and_blank_yield_empty_list() {
        assert!(split_addresses(None).is_empty());
        assert!(split_addresses(Some("")).is_empty());
        assert!(split_addresses(Some("   ")).is_empty());
    }

    #[test]
    fn unmatched_quote_discards_whole_field() {
        let raw = "\"Smith, John <a@b.com>, b@c.com";
        assert!(split_addresses(Some(raw)).is_empty());
    }

    #[test]
    fn unclosed_angle_bracket_discards_whole_field() {
        let raw = "\"Closing Bracket Missing For Some Reason\" <hi@example.com";
        assert!(split_addresses(Some(raw)).is_empty());
    }

    #[test]
    fn escaped_quote_stays_inside_display_name() {
        let raw = r#""Quote \" inside" <q@example.com>, other@example.com"#;
        assert_eq!(
            split_addresses(Some(raw)),
            vec![r#""Quote \" inside" <q@example.com>"#, "other@example.com"]
        );
    }

    #[test]
    fn address_part_extracts_bracketed_address() {
        assert_eq!(
            address_part("\"Ann Example\" <ann@example.com>"),
            "ann@example.com"
        );
        assert_eq!(address_part("<no-name@example.com>"), "no-name@example.com");
        assert_eq!(address_part("plain@example.com"), "plain@example.com");
        assert_eq!(address_part("  padded@example.com  "), "padded@example.com");
    }
}
