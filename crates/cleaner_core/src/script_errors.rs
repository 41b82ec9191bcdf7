/// A runtime error surfaced by some script on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptErrorEvent {
    pub filename: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Default handling is prevented.
    Suppressed,
    PassThrough,
}

/// Suppresses errors whose source file name contains one of `noisy_sources`.
pub fn classify_script_error(
    event: &ScriptErrorEvent,
    noisy_sources: &[String],
) -> ErrorDisposition {
    let from_noisy_source = event.filename.as_deref().is_some_and(|filename| {
        noisy_sources
            .iter()
            .any(|source| !source.is_empty() && filename.contains(source.as_str()))
    });
    if from_noisy_source {
        ErrorDisposition::Suppressed
    } else {
        ErrorDisposition::PassThrough
    }
}
