//! Matrix file parser using Pest
//!
//! Accepts the text layout produced by the matrix editors: a size header
//! line, then one row per line. Size and row-length mismatches are reported
//! here so the graph constructors only ever see well-formed matrices.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "io/matrix.pest"]
struct MatrixParser;

/// Parser errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Pest parsing error
    #[error("Parse error: {0}")]
    PestError(#[from] pest::error::Error<Rule>),

    /// A token that matched the grammar but does not fit the number type
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// Header and body disagree
    #[error("Semantic error: {0}")]
    SemanticError(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

fn parse_integer(pair: Pair<Rule>) -> ParseResult<i64> {
    let text = pair.as_str();
    text.parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

fn parse_cell(pair: Pair<Rule>) -> ParseResult<Option<f64>> {
    match pair.as_rule() {
        Rule::missing => Ok(None),
        _ => {
            let text = pair.as_str();
            text.parse::<f64>()
                .map(Some)
                .map_err(|_| ParseError::InvalidNumber(text.to_string()))
        }
    }
}

/// Split a parsed matrix into its header value and rows
fn parse_rows<T>(
    input: &str,
    rule: Rule,
    row_rule: Rule,
    cell: fn(Pair<Rule>) -> ParseResult<T>,
) -> ParseResult<(i64, Vec<Vec<T>>)> {
    let matrix = MatrixParser::parse(rule, input)?
        .next()
        .ok_or_else(|| ParseError::SemanticError("empty input".to_string()))?;

    let mut size = None;
    let mut rows = Vec::new();
    for pair in matrix.into_inner() {
        match pair.as_rule() {
            Rule::header => {
                if let Some(value) = pair.into_inner().next() {
                    size = Some(parse_integer(value)?);
                }
            }
            r if r == row_rule => {
                let row = pair.into_inner().map(cell).collect::<ParseResult<Vec<T>>>()?;
                rows.push(row);
            }
            _ => {}
        }
    }

    let size = size.ok_or_else(|| ParseError::SemanticError("missing size header".to_string()))?;
    Ok((size, rows))
}

fn check_square<T>(size: i64, rows: &[Vec<T>]) -> ParseResult<()> {
    if size <= 0 {
        return Err(ParseError::SemanticError(format!(
            "vertex count must be positive, got {}",
            size
        )));
    }
    let n = size as usize;
    if rows.len() != n {
        return Err(ParseError::SemanticError(format!(
            "expected {} rows, found {}",
            n,
            rows.len()
        )));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(ParseError::SemanticError(format!(
                "row {} has length {}, expected {}",
                i + 1,
                row.len(),
                n
            )));
        }
    }
    Ok(())
}

/// Parse a square matrix of edge multiplicities
pub fn parse_adjacency(input: &str) -> ParseResult<Vec<Vec<i64>>> {
    let (size, rows) = parse_rows(input, Rule::int_matrix, Rule::int_row, parse_integer)?;
    check_square(size, &rows)?;
    Ok(rows)
}

/// Parse a square matrix of weights; `-` and `nan` cells are `None`
pub fn parse_weights(input: &str) -> ParseResult<Vec<Vec<Option<f64>>>> {
    let (size, rows) = parse_rows(input, Rule::real_matrix, Rule::real_row, parse_cell)?;
    check_square(size, &rows)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.filter(|v| !v.is_nan())).collect())
        .collect())
}

/// Parse an incidence matrix: header is the edge (row) count
pub fn parse_incidence(input: &str) -> ParseResult<Vec<Vec<i64>>> {
    let (size, rows) = parse_rows(input, Rule::int_matrix, Rule::int_row, parse_integer)?;
    if size < 0 || rows.len() != size as usize {
        return Err(ParseError::SemanticError(format!(
            "expected {} rows, found {}",
            size,
            rows.len()
        )));
    }
    if let Some(first) = rows.first() {
        if let Some(i) = rows.iter().position(|row| row.len() != first.len()) {
            return Err(ParseError::SemanticError(format!(
                "row {} has length {}, expected {}",
                i + 1,
                rows[i].len(),
                first.len()
            )));
        }
    }
    Ok(rows)
}
