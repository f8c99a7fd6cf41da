//! # Utilities Module
//!
//! ## Purpose
//! Common helpers used throughout the discovery search engine for latency
//! measurement and log-safe text handling.

use std::time::Instant;

/// Performance timer for measuring operation duration
pub struct Timer {
    start: Instant,
    name: String,
}

/// Text helpers for logging
pub struct TextUtils;

impl Timer {
    /// Start a new timer with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop timer and log duration
    pub fn stop(self) -> u64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!("Timer '{}' completed in {}ms", self.name, elapsed);
        elapsed
    }
}

impl TextUtils {
    /// Truncate text to a character count with ellipsis, for log previews.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        let mut chars = text.chars();
        let preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(TextUtils::truncate("lease", 10), "lease");
    }

    #[test]
    fn truncate_long_text_adds_ellipsis() {
        assert_eq!(TextUtils::truncate("vehicle bill of sale", 7), "vehicle...");
    }

    #[test]
    fn truncate_is_char_safe() {
        // Multi-byte characters must not be split.
        assert_eq!(TextUtils::truncate("vehículo", 4), "vehí...");
    }

    #[test]
    fn timer_measures_elapsed() {
        let timer = Timer::new("test");
        assert!(timer.elapsed_ms() < 1000);
    }
}
