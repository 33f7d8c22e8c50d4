use super::*;

const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1048576.0),
    ("Gi", 1073741824.0),
    ("Ti", 1099511627776.0),
    ("Pi", 1125899906842624.0),
    ("Ei", 1152921504606846976.0),
];

const DECIMAL_SUFFIXES: [(&str, f64); 9] = [
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

// Parse a Kubernetes resource quantity ("250m", "64Mi", "1e3", "2") into its value in base units
// (cores, bytes).  Note that "1E" is an exa-suffix but "1e3" is an exponent.
pub fn parse_quantity(q: &str) -> anyhow::Result<f64> {
    let q = q.trim();
    for (suffix, mult) in BINARY_SUFFIXES.iter().chain(DECIMAL_SUFFIXES.iter()) {
        if let Some(num) = q.strip_suffix(suffix) {
            return parse_number(q, num).map(|n| n * mult);
        }
    }
    parse_number(q, q)
}

fn parse_number(q: &str, num: &str) -> anyhow::Result<f64> {
    match num.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(MetricError::malformed_quantity(q)),
    }
}
