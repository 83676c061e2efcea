//! A DIMACS-like shortest-path format reader, used by the [`crate::dijkstra`]
//! demo. Lines starting with `c` are comments; a `p sp <n> <m>` line
//! declares `n` vertices (1-indexed) and `m` edges; each `a <u> <v> <w>`
//! line declares a directed edge.

use std::io::BufRead;

use crate::error::InputError;

/// A parsed DIMACS shortest-path graph: vertex count and directed, weighted
/// edges, both 0-indexed.
#[derive(Debug, Clone, Default)]
pub struct DimacsGraph {
    /// Number of vertices, 0-indexed (the DIMACS format itself is
    /// 1-indexed; indices are shifted down by one on read).
    pub vertex_count: usize,
    /// Directed edges as `(tail, head, weight)`, 0-indexed.
    pub edges: Vec<(usize, usize, i64)>,
}

/// Reads a [`DimacsGraph`] from `reader`.
pub fn read_dimacs<R: BufRead>(reader: R) -> Result<DimacsGraph, InputError> {
    let mut graph = DimacsGraph::default();
    let mut declared_n: Option<usize> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| InputError::FileNotFound {
            path: "<reader>".to_string(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("p") => {
                let kind = fields.next().ok_or_else(|| malformed(line_no, "missing problem kind"))?;
                if kind != "sp" {
                    return Err(malformed(line_no, &format!("unsupported problem kind {kind:?}")));
                }
                let n = parse_usize(fields.next(), line_no, "vertex count")?;
                declared_n = Some(n);
                graph.vertex_count = n;
            }
            Some("a") => {
                let u = parse_usize(fields.next(), line_no, "edge tail")?;
                let v = parse_usize(fields.next(), line_no, "edge head")?;
                let w = parse_i64(fields.next(), line_no, "edge weight")?;
                if u == 0 || v == 0 {
                    return Err(malformed(line_no, "vertex ids in `a` lines are 1-indexed"));
                }
                graph.edges.push((u - 1, v - 1, w));
            }
            Some(other) => {
                return Err(malformed(line_no, &format!("unrecognized line kind {other:?}")));
            }
            None => {}
        }
    }

    if declared_n.is_none() {
        return Err(malformed(0, "missing `p sp` header line"));
    }
    Ok(graph)
}

fn malformed(line_no: usize, reason: &str) -> InputError {
    InputError::Malformed {
        where_: format!("line {}", line_no + 1),
        reason: reason.to_string(),
    }
}

fn parse_usize(token: Option<&str>, line_no: usize, what: &str) -> Result<usize, InputError> {
    let token = token.ok_or_else(|| malformed(line_no, &format!("missing {what}")))?;
    token
        .parse::<usize>()
        .map_err(|_| InputError::NotAnInteger {
            where_: format!("line {}", line_no + 1),
            token: token.to_string(),
        })
}

fn parse_i64(token: Option<&str>, line_no: usize, what: &str) -> Result<i64, InputError> {
    let token = token.ok_or_else(|| malformed(line_no, &format!("missing {what}")))?;
    token.parse::<i64>().map_err(|_| InputError::NotAnInteger {
        where_: format!("line {}", line_no + 1),
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_edges() {
        let input = "c a comment\np sp 3 2\na 1 2 5\na 2 3 7\n";
        let graph = read_dimacs(input.as_bytes()).unwrap();
        assert_eq!(graph.vertex_count, 3);
        assert_eq!(graph.edges, vec![(0, 1, 5), (1, 2, 7)]);
    }

    #[test]
    fn rejects_missing_header() {
        let input = "a 1 2 5\n";
        assert!(read_dimacs(input.as_bytes()).is_err());
    }

    #[test]
    fn rejects_zero_indexed_edges() {
        let input = "p sp 2 1\na 0 1 5\n";
        assert!(read_dimacs(input.as_bytes()).is_err());
    }
}
