//! Small argument parsers.

/// Parse a `--set` cell spec: `ROW:HEADER=VALUE`, row 0-based.
/// The header may contain anything but `=`; the value is taken verbatim.
pub fn parse_set_spec(spec: &str) -> Result<(usize, String, String), String> {
    let (row_part, rest) = spec
        .split_once(':')
        .ok_or_else(|| format!("invalid cell spec '{spec}': expected ROW:HEADER=VALUE"))?;

    let row: usize = row_part
        .trim()
        .parse()
        .map_err(|_| format!("invalid row index '{row_part}' in cell spec"))?;

    let (header, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("invalid cell spec '{spec}': expected ROW:HEADER=VALUE"))?;

    if header.is_empty() {
        return Err(format!("empty header in cell spec '{spec}'"));
    }

    Ok((row, header.to_string(), value.to_string()))
}
