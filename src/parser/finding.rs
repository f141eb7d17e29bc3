use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Review categories. `CodeBlocks` and `Explanation` only carry content for raw blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bugs,
    CodeStyle,
    Security,
    Suggestions,
    CodeBlocks,
    Explanation,
}

impl Category {
    /// Categories that hold discrete findings
    pub const FINDINGS: [Category; 4] = [
        Category::Bugs,
        Category::CodeStyle,
        Category::Security,
        Category::Suggestions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Bugs => "Bugs",
            Category::CodeStyle => "Code Style",
            Category::Security => "Security",
            Category::Suggestions => "Suggestions",
            Category::CodeBlocks => "Improved Code",
            Category::Explanation => "Explanation",
        }
    }

    /// Resolve a structured-payload field name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "bugs" => Some(Category::Bugs),
            "code_style" | "codeStyle" | "style" => Some(Category::CodeStyle),
            "security" => Some(Category::Security),
            "suggestions" => Some(Category::Suggestions),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Bugs => write!(f, "bugs"),
            Category::CodeStyle => write!(f, "code_style"),
            Category::Security => write!(f, "security"),
            Category::Suggestions => write!(f, "suggestions"),
            Category::CodeBlocks => write!(f, "code_blocks"),
            Category::Explanation => write!(f, "explanation"),
        }
    }
}

/// Which reviewer produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Fast,
    Deep,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Fast, Backend::Deep];

    /// Name the upstream service uses for this reviewer
    pub fn source_name(&self) -> &'static str {
        match self {
            Backend::Fast => "GROQ",
            Backend::Deep => "GEMINI",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Fast => write!(f, "fast"),
            Backend::Deep => write!(f, "deep"),
        }
    }
}

/// One trimmed, non-empty review remark. Markdown markup is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Finding(String);

impl Finding {
    /// Returns `None` when the text is blank after trimming
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic 12-char id for keying presentation state
    /// Uses: filename | category | backend | text
    pub fn fingerprint(&self, filename: &str, category: Category, backend: Backend) -> String {
        let input = format!("{}|{}|{}|{}", filename, category, backend, self.0);
        let hash = Sha256::digest(input.as_bytes());
        format!("{:x}", hash)[..12].to_string()
    }
}

impl<'de> Deserialize<'de> for Finding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Finding::new(&raw).ok_or_else(|| serde::de::Error::custom("finding must not be empty"))
    }
}

impl AsRef<str> for Finding {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_trims_and_rejects_blank() {
        assert_eq!(Finding::new("  off-by-one \n").unwrap().as_str(), "off-by-one");
        assert!(Finding::new(" \n\t ").is_none());
        assert!(Finding::new("").is_none());
    }

    #[test]
    fn test_finding_keeps_markup() {
        let finding = Finding::new("**Unused** import `os`").unwrap();
        assert_eq!(finding.as_str(), "**Unused** import `os`");
    }

    #[test]
    fn test_fingerprint_stability() {
        let finding = Finding::new("null deref").unwrap();
        let fp1 = finding.fingerprint("a.py", Category::Bugs, Backend::Deep);
        let fp2 = finding.fingerprint("a.py", Category::Bugs, Backend::Deep);
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.len(), 12);
    }

    #[test]
    fn test_fingerprint_differs_by_backend() {
        let finding = Finding::new("null deref").unwrap();
        let fast = finding.fingerprint("a.py", Category::Bugs, Backend::Fast);
        let deep = finding.fingerprint("a.py", Category::Bugs, Backend::Deep);
        assert_ne!(fast, deep);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Finding>("\"  \"").is_err());
        let finding: Finding = serde_json::from_str("\" x \"").unwrap();
        assert_eq!(finding.as_str(), "x");
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(Category::from_key("codeStyle"), Some(Category::CodeStyle));
        assert_eq!(Category::from_key("security"), Some(Category::Security));
        assert_eq!(Category::from_key("explanation"), None);
        assert_eq!(Category::CodeStyle.to_string(), "code_style");
    }
}
