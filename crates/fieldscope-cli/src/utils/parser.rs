use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid coordinate '{value}' in '{input}'. Expected a decimal number.")]
    InvalidCoordinate { input: String, value: String },

    #[error("Expected {expected} comma-separated values in '{input}', found {found}.")]
    WrongComponentCount {
        input: String,
        expected: &'static str,
        found: usize,
    },
}

/// Parses `"x,y,z"` into a coordinate triple. Whitespace around components is ignored.
pub fn parse_point(input: &str) -> Result<[f64; 3], ParseError> {
    let components: Vec<&str> = input.split(',').map(str::trim).collect();
    let [x, y, z] = components.as_slice() else {
        return Err(ParseError::WrongComponentCount {
            input: input.to_string(),
            expected: "3",
            found: components.len(),
        });
    };

    let number = |value: &str| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidCoordinate {
                input: input.to_string(),
                value: value.to_string(),
            })
    };
    Ok([number(*x)?, number(*y)?, number(*z)?])
}

/// Expands a resolution override of one (uniform) or three (per-axis) values.
pub fn parse_resolution(values: &[usize]) -> Result<[usize; 3], ParseError> {
    match *values {
        [n] => Ok([n; 3]),
        [x, y, z] => Ok([x, y, z]),
        _ => Err(ParseError::WrongComponentCount {
            input: values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            expected: "1 or 3",
            found: values.len(),
        }),
    }
}
