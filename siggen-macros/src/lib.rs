use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Creates a `BreakpointSet` at compile time from a string literal.
///
/// The literal uses the breakpoint file format and is validated while
/// compiling, so a malformed set is a compile error rather than a runtime
/// `ParseError`. The expansion builds the points directly with no parsing at
/// run time.
///
/// # Format
///
/// One `time value` pair per line, separated by whitespace:
/// - times are in seconds, start at or after 0 and never decrease
/// - a repeated time makes an instant jump
/// - tokens after the first two on a line are ignored
/// - blank lines are allowed only before the first and after the last pair
/// - at least two pairs are required
///
/// # Examples
///
/// ```ignore
/// use siggen::breakpoints;
///
/// let fade_in = breakpoints!("0 0\n0.5 1");
///
/// let step = breakpoints!("
///     0 0
///     1 0
///     1 1
///     2 1
/// ");
/// ```
#[proc_macro]
pub fn breakpoints(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let text = input.value();

    match parse_breakpoints(&text) {
        Ok(points) => {
            let times = points.iter().map(|(time, _)| time);
            let values = points.iter().map(|(_, value)| value);
            let expanded = quote! {
                ::siggen::BreakpointSet::__from_validated(::std::vec![
                    #(::siggen::Breakpoint::new(#times, #values)),*
                ])
            };
            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("invalid breakpoints: {}", e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_breakpoints(text: &str) -> Result<Vec<(f64, f64)>, String> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    let mut blank_line = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            if !points.is_empty() && blank_line.is_none() {
                blank_line = Some(number);
            }
            continue;
        };
        if let Some(blank) = blank_line {
            return Err(format!("line {} has non-numeric data", blank));
        }

        let time = parse_number(first)
            .ok_or_else(|| format!("line {} has non-numeric data", number))?;
        let value = match tokens.next() {
            None => return Err(format!("line {} has an incomplete breakpoint", number)),
            Some(token) => parse_number(token)
                .ok_or_else(|| format!("line {} has a non-numeric value '{}'", number, token))?,
        };

        let previous = points.last().map_or(0.0, |p| p.0);
        if time < previous {
            return Err(format!(
                "breakpoint at line {} not increasing in time ({} < {})",
                number, time, previous
            ));
        }
        points.push((time, value));
    }

    if points.len() < 2 {
        return Err(format!(
            "too few breakpoints: found {}, at least 2 required",
            points.len()
        ));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_breakpoints() {
        let points = parse_breakpoints("0 0\n0.5 1\n2 -1 comment").unwrap();
        assert_eq!(points, vec![(0.0, 0.0), (0.5, 1.0), (2.0, -1.0)]);
    }

    #[test]
    fn test_surrounding_blank_lines() {
        let points = parse_breakpoints("\n   0 1\n   1 2\n   ").unwrap();
        assert_eq!(points, vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_blank_line_between_points() {
        let err = parse_breakpoints("0 1\n\n1 2").unwrap_err();
        assert!(err.contains("line 2"), "{err}");
    }

    #[test]
    fn test_rejections() {
        assert!(parse_breakpoints("").is_err());
        assert!(parse_breakpoints("0 1").is_err());
        assert!(parse_breakpoints("0 1\nx 2").is_err());
        assert!(parse_breakpoints("0 1\n1").is_err());
        assert!(parse_breakpoints("0 1\n1 inf").is_err());
        assert!(parse_breakpoints("1 1\n0.5 2").is_err());
        assert!(parse_breakpoints("-1 0\n1 1").is_err());
    }

    #[test]
    fn test_jump_allowed() {
        let points = parse_breakpoints("0 0\n1 0\n1 1").unwrap();
        assert_eq!(points.len(), 3);
    }
}
