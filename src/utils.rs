// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions for the resampling library

/// Pluralize a noun for display, leaving it singular when `count` is 1.
///
/// # Arguments
///
/// * `word` - Singular noun.
/// * `count` - How many of it there are.
#[must_use]
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    match word {
        "person" => "persons".to_string(),
        "index" => "indices".to_string(),
        "vertex" => "vertices".to_string(),
        _ => {
            if word.ends_with('s') || word.ends_with("ch") || word.ends_with("sh") {
                format!("{word}es")
            } else if word.ends_with('y') && !word.ends_with("ey") && !word.ends_with("ay") {
                format!("{}ies", &word[..word.len() - 1])
            } else {
                format!("{word}s")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("sequence", 1), "sequence");
        assert_eq!(pluralize("sequence", 0), "sequences");
        assert_eq!(pluralize("label", 3), "labels");
        assert_eq!(pluralize("class", 2), "classes");
        assert_eq!(pluralize("body", 2), "bodies");
        assert_eq!(pluralize("key", 2), "keys");
        assert_eq!(pluralize("index", 2), "indices");
    }
}
