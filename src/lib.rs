//! Normalize free-form code review text from two reviewer backends into
//! structured per-file findings.
//!
//! ```
//! use duorev::parser::{Backend, Category, Normalizer};
//!
//! let body = r#"{"review": {"app.py": "==== GROQ REVIEW ====\n**Bugs or Errors:**\n1. off-by-one\n"}}"#;
//! let reviews = Normalizer::default().normalize_str(body).unwrap();
//! let app = reviews.get("app.py").unwrap();
//! assert_eq!(app.findings(Category::Bugs, Backend::Fast)[0].as_str(), "off-by-one");
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod runner;
pub mod source;

pub use error::PayloadError;
pub use parser::{Normalizer, ReviewCollection, ReviewPayload};
