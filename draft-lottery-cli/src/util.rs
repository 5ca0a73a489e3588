use anyhow::{Context, Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve a seed argument: a decimal or `0x` hex integer, or `random`.
pub fn resolve_seed(token: &str) -> Result<u64> {
    let token = token.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("random") {
        return Ok(rand::random::<u64>());
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return u64::from_str_radix(&hex.replace('_', ""), 16)
            .with_context(|| format!("invalid hex seed: {token}"));
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(value);
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(value.unsigned_abs());
    }

    bail!("Unrecognized seed token: {token}");
}

/// Parse a comma-separated list of original positions.
pub fn parse_order(raw: &str) -> Result<Vec<u32>> {
    split_csv(raw)
        .iter()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("invalid position in order: {token}"))
        })
        .collect()
}

/// Quote a CSV field when it contains separators or quotes.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
