//! Dense weight-matrix reader: a size `n` followed by `n * n` whitespace-
//! separated integers, read row-major as `weights[i][j]`.

use std::io::Read;

use crate::error::InputError;

/// Reads an `n x n` dense weight matrix from `reader`.
///
/// The expected shape is a single integer `n` followed by `n * n` signed
/// integers, all separated by arbitrary whitespace (spaces or newlines).
pub fn read_matrix<R: Read>(mut reader: R) -> Result<Vec<Vec<i64>>, InputError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| InputError::FileNotFound {
            path: "<reader>".to_string(),
            source,
        })?;

    let mut tokens = contents.split_whitespace();

    let n = parse_token(tokens.next(), "matrix size")?;
    if n < 0 {
        return Err(InputError::Malformed {
            where_: "matrix size".to_string(),
            reason: format!("size must be non-negative, got {n}"),
        });
    }
    let n = n as usize;

    let mut weights = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            weights[i][j] = parse_token(tokens.next(), &format!("weight row {i} col {j}"))?;
        }
    }
    Ok(weights)
}

fn parse_token(token: Option<&str>, where_: &str) -> Result<i64, InputError> {
    let token = token.ok_or_else(|| InputError::Malformed {
        where_: where_.to_string(),
        reason: "unexpected end of input".to_string(),
    })?;
    token.parse::<i64>().map_err(|_| InputError::NotAnInteger {
        where_: where_.to_string(),
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_well_formed_matrix() {
        let input = "2\n1 2\n3 4\n";
        let weights = read_matrix(input.as_bytes()).unwrap();
        assert_eq!(weights, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn accepts_n_zero_as_an_empty_matrix() {
        let weights = read_matrix("0".as_bytes()).unwrap();
        assert_eq!(weights, Vec::<Vec<i64>>::new());
    }

    #[test]
    fn rejects_truncated_input() {
        let err = read_matrix("2\n1 2\n3".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Malformed { .. }));
    }

    #[test]
    fn rejects_non_integer_tokens() {
        let err = read_matrix("1\nabc".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::NotAnInteger { .. }));
    }

    #[test]
    fn rejects_negative_size() {
        let err = read_matrix("-1".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Malformed { .. }));
    }
}
