//! Document chunking for ingestion

use crate::domain::DomainError;

/// Split a document into fixed-size character windows with overlap
///
/// Blank input yields no chunks. Requires `chunk_size > 0` and
/// `0 <= overlap < chunk_size`.
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, DomainError> {
    if chunk_size == 0 {
        return Err(DomainError::validation("chunk_size must be positive"));
    }
    if overlap >= chunk_size {
        return Err(DomainError::validation(
            "overlap must be in range [0, chunk_size)",
        ));
    }
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_with_overlap() {
        let chunks = chunk_text("abcdefghij", 4, 2).unwrap();
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij"]);
    }

    #[test]
    fn test_trailing_partial_chunk() {
        let chunks = chunk_text("abcdefg", 3, 0).unwrap();
        assert_eq!(chunks, vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_blank_text_yields_no_chunks() {
        assert!(chunk_text("   ", 10, 2).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(chunk_text("text", 0, 0).is_err());
        assert!(chunk_text("text", 4, 4).is_err());
        assert!(chunk_text("text", 4, 5).is_err());
    }

    #[test]
    fn test_multibyte_characters_split_on_char_boundaries() {
        let chunks = chunk_text("héllo wörld", 6, 1).unwrap();
        assert_eq!(chunks[0], "héllo ");
        assert!(chunks.iter().all(|c| c.chars().count() <= 6));
    }
}
