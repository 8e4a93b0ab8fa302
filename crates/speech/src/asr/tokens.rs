use crate::SpeechError;
use std::fs;
use std::path::Path;

/// Load a `<token> <id>` vocabulary file.
///
/// IDs must be contiguous starting at 0; the returned Vec is indexed by ID.
pub fn load_tokens(path: impl AsRef<Path>) -> Result<Vec<String>, SpeechError> {
    let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
        SpeechError::Io(format!(
            "failed to read tokens file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let mut entries: Vec<(usize, String)> = Vec::new();

    for (line_num, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // the last field is the ID, everything before is the token text
        let Some((text, id_str)) = line.rsplit_once(char::is_whitespace) else {
            return Err(SpeechError::Runtime(format!(
                "malformed tokens file at line {}: expected '<token> <id>', got '{}'",
                line_num + 1,
                line
            )));
        };

        let id: usize = id_str.parse().map_err(|_| {
            SpeechError::Runtime(format!(
                "malformed tokens file at line {}: invalid ID '{}'",
                line_num + 1,
                id_str
            ))
        })?;

        entries.push((id, text.trim_end().to_string()));
    }

    entries.sort_by_key(|(id, _)| *id);

    for (i, (id, _)) in entries.iter().enumerate() {
        if *id != i {
            return Err(SpeechError::Runtime(format!(
                "non-contiguous token IDs: expected {}, got {}",
                i, id
            )));
        }
    }

    Ok(entries.into_iter().map(|(_, text)| text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("gesty-tokens-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_tokens_ordered() {
        let path = write_temp("ordered", "<blk> 0\na 1\nb 2\n");
        let tokens = load_tokens(&path).unwrap();
        assert_eq!(tokens, vec!["<blk>", "a", "b"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_tokens_unordered() {
        let path = write_temp("unordered", "b 2\n<blk> 0\na 1\n");
        let tokens = load_tokens(&path).unwrap();
        assert_eq!(tokens, vec!["<blk>", "a", "b"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_tokens_gap_rejected() {
        let path = write_temp("gap", "<blk> 0\na 2\n");
        assert!(load_tokens(&path).is_err());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_tokens_malformed_rejected() {
        let path = write_temp("malformed", "justoken\n");
        assert!(load_tokens(&path).is_err());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_tokens_missing_file() {
        assert!(load_tokens("/nonexistent/tokens.txt").is_err());
    }
}
