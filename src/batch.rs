//! Parallel analysis of many diagnostic texts.
//!
//! Every analysis is independent, so inputs are spread over the rayon thread
//! pool with no coordination. Results come back in input order.
//!
//! # Example
//!
//! ```ignore
//! let batcher = Batcher::new(Config::default());
//! for (path, result) in logs.iter().zip(batcher.analyze_paths(&logs)) {
//!     match result {
//!         Ok(result) => println!("{}: {} problem(s)", path.display(), result.len()),
//!         Err(e) => eprintln!("{}: {e}", path.display()),
//!     }
//! }
//! ```

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::{AnalysisResult, Analyzer};
use crate::config::Config;
use crate::error::AnalyzeError;

/// Batch analyzer sharing one configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Batcher {
    analyzer: Analyzer,
}

impl Batcher {
    /// Create a batcher with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            analyzer: Analyzer::new(config),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        self.analyzer.config()
    }

    /// Analyze multiple texts in parallel.
    ///
    /// Blank texts give `None`, as with [`analyze`](crate::analyze).
    pub fn analyze_all<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Option<AnalysisResult>> {
        self.analyze_all_each(texts, |_| {})
    }

    /// Analyze multiple texts in parallel with callback for each text.
    ///
    /// The callback receives the input index once its analysis is done.
    /// Useful for progress tracking.
    pub fn analyze_all_each<S, F>(&self, texts: &[S], on_each: F) -> Vec<Option<AnalysisResult>>
    where
        S: AsRef<str> + Sync,
        F: Fn(usize) + Sync,
    {
        if texts.is_empty() {
            return vec![];
        }

        let results: Vec<_> = texts
            .par_iter()
            .enumerate()
            .map(|(i, text)| {
                let result = self.analyzer.analyze(text.as_ref());
                on_each(i);
                result
            })
            .collect();

        debug!(
            inputs = texts.len(),
            analyzed = results.iter().filter(|r| r.is_some()).count(),
            "batch analysis done"
        );
        results
    }

    /// Read and analyze multiple files in parallel.
    ///
    /// Unreadable files give [`AnalyzeError::Io`], blank files
    /// [`AnalyzeError::EmptyInput`]. One failure does not affect the others.
    pub fn analyze_paths<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> Vec<Result<AnalysisResult, AnalyzeError>> {
        if paths.is_empty() {
            return vec![];
        }

        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let result = self.analyzer.analyze_file(path);
                match &result {
                    Ok(r) => debug!(path = %path.display(), problems = r.len(), "analyzed file"),
                    Err(e) if e.is_empty_input() => debug!(path = %path.display(), "empty input file"),
                    Err(e) => warn!(path = %path.display(), error = %e, "failed to analyze file"),
                }
                result
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, PathMode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_analyze_all_preserves_order() {
        let texts = vec![
            "Cannot find name 'a'.".to_string(),
            "   ".to_string(),
            "Cannot find module 'b'.".to_string(),
            "unrecognized".to_string(),
        ];
        let results = Batcher::default().analyze_all(&texts);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().problems[0].name(), Some("a"));
        assert!(results[1].is_none());
        assert_eq!(results[2].as_ref().unwrap().problems[0].module_name(), Some("b"));
        assert!(results[3].as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_analyze_all_matches_sequential() {
        let texts: Vec<String> = (0..32)
            .map(|i| format!("error TS{:04}: Property 'p{i}' does not exist on type 'T'.", 2000 + i))
            .collect();
        let parallel = Batcher::default().analyze_all(&texts);
        let sequential: Vec<_> = texts.iter().map(|t| crate::analyze(t)).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_analyze_all_each_callback() {
        let count = AtomicUsize::new(0);
        let texts = ["Cannot find name 'a'.", "Cannot find name 'b'.", ""];
        let results = Batcher::default().analyze_all_each(&texts, |_| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(results.len(), 3);
        assert_eq!(count.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_empty_batch() {
        let texts: [&str; 0] = [];
        assert!(Batcher::default().analyze_all(&texts).is_empty());
    }

    #[test]
    fn test_analyze_paths() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("ok.log");
        let blank = dir.path().join("blank.log");
        let missing = dir.path().join("missing.log");
        std::fs::write(&ok, "error TS2304: Cannot find name 'foo'.").unwrap();
        std::fs::write(&blank, "\n\n").unwrap();

        let results = Batcher::default().analyze_paths(&[&ok, &blank, &missing]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().error_code.as_deref(), Some("TS2304"));
        assert!(matches!(results[1], Err(AnalyzeError::EmptyInput { .. })));
        assert!(matches!(results[2], Err(AnalyzeError::Io(_))));
    }

    #[test]
    fn test_config_is_applied() {
        let config = ConfigBuilder::new().path_mode(PathMode::Indented).build();
        let batcher = Batcher::new(config);
        assert_eq!(batcher.config().path_mode, PathMode::Indented);

        let text = "  Types of property 'a' are incompatible.\nObject is possibly 'null'.";
        let results = batcher.analyze_all(&[text]);
        assert!(results[0].as_ref().unwrap().problems[0].path.is_empty());
    }
}
