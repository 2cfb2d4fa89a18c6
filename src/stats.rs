use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq, Clone, Copy)]
#[error("Cannot compute the mean of an empty sequence")]
#[diagnostic(code(weather::stats::empty))]
pub struct EmptyInputError;

/// An extreme value and the position of its last occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub index: usize,
}

pub fn calculate_mean(values: &[f64]) -> Result<f64, EmptyInputError> {
    if values.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest value; ties resolve to the last occurrence.
pub fn find_min(values: &[f64]) -> Option<Extremum> {
    scan(values, |candidate, best| candidate <= best)
}

/// Largest value; ties resolve to the last occurrence.
pub fn find_max(values: &[f64]) -> Option<Extremum> {
    scan(values, |candidate, best| candidate >= best)
}

fn scan(values: &[f64], replaces: impl Fn(f64, f64) -> bool) -> Option<Extremum> {
    let (&first, rest) = values.split_first()?;
    let mut best = Extremum {
        value: first,
        index: 0,
    };
    for (index, &value) in rest.iter().enumerate() {
        if replaces(value, best.value) {
            best = Extremum {
                value,
                index: index + 1,
            };
        }
    }
    Some(best)
}
