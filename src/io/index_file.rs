//! Test index file parsing

use crate::{PlanetoidError, Result};

/// Parse a test index file: one node index per non-empty line, in file order
pub fn parse_index_file(contents: &str) -> Result<Vec<usize>> {
    let mut index = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value = line.parse::<usize>().map_err(|e| {
            PlanetoidError::Deserialization(format!(
                "test index line {}: {:?} is not a node index ({})",
                line_no + 1,
                line,
                e
            ))
        })?;
        index.push(value);
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let index = parse_index_file("2692\n2532\n\n2050 \r\n").unwrap();
        assert_eq!(index, vec![2692, 2532, 2050]);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_index_file("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_index_file("12\n-3\n").unwrap_err();
        match err {
            PlanetoidError::Deserialization(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
