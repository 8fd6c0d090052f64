use s3presign_core::time::DateTime;

/// Folder every upload lands in, below the optional company prefix.
const INPUTS_DIR: &str = "inputs";

/// ObjectKeyBuilder lays out where uploaded files are stored:
///
/// ```text
/// [{company_prefix}/]inputs/{YYYY-MM-DD}/{HH-MM-SS}/{filename}
/// ```
///
/// The filename is used as supplied. Escaping it, or rejecting path
/// separators in it, is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectKeyBuilder {
    company_prefix: Option<String>,
}

impl ObjectKeyBuilder {
    /// Create a builder. An empty prefix behaves like no prefix.
    pub fn new(company_prefix: Option<String>) -> Self {
        let company_prefix = company_prefix
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());

        Self { company_prefix }
    }

    /// Build the key of `filename` uploaded at `now`.
    pub fn timestamped(&self, filename: &str, now: DateTime) -> String {
        let path = format!(
            "{INPUTS_DIR}/{}/{}/{filename}",
            now.format("%Y-%m-%d"),
            now.format("%H-%M-%S")
        );

        match &self.company_prefix {
            Some(prefix) => format!("{prefix}/{path}"),
            None => path,
        }
    }
}
