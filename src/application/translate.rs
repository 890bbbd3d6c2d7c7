use crate::domain::error::LingoError;
use crate::domain::model::{
    is_supported, CacheKey, TranslationOrigin, TranslationReport, SOURCE_LANGUAGE,
};
use crate::state::AppState;
use futures_util::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Resolve the effective target language for one invocation: the `-l`
/// override when given (validated), otherwise the saved preference.
pub fn resolve_language(state: &AppState, requested: Option<&str>) -> Result<String, LingoError> {
    match requested {
        Some(code) if is_supported(code) => Ok(code.to_string()),
        Some(code) => Err(LingoError::Config(format!(
            "Unsupported language code '{}' (see --languages)",
            code
        ))),
        None => Ok(state.service.current_language()),
    }
}

/// Translate one text and report where the result came from.
pub async fn translate_text(
    state: &AppState,
    text: &str,
    requested: Option<&str>,
) -> Result<TranslationReport, LingoError> {
    let language = resolve_language(state, requested)?;
    Ok(translate_one(state, text, &language).await)
}

async fn translate_one(state: &AppState, text: &str, language: &str) -> TranslationReport {
    let passthrough = text.trim().is_empty() || language == SOURCE_LANGUAGE;
    // Probe the cache before translating so the report can distinguish a
    // warm hit from a round-trip. The service would answer either way.
    let cached = (!passthrough)
        .then(|| state.service.cache_lookup(&CacheKey::new(text, language)))
        .flatten();

    let translated = state.service.translate_to(text, language).await;

    let origin = if passthrough {
        TranslationOrigin::Passthrough
    } else if cached.is_some() {
        TranslationOrigin::LocalCache
    } else {
        TranslationOrigin::Online
    };

    TranslationReport {
        changed: translated != text,
        source_text: text.to_string(),
        translated_text: translated,
        language: language.to_string(),
        origin,
    }
}

/// Translate every non-empty line of a file, rendering progress on the
/// way. Each cache miss costs at least one pacing interval, so large
/// files are slow on a cold cache.
pub async fn translate_file(
    state: &AppState,
    path: &Path,
    requested: Option<&str>,
    show_progress: bool,
) -> Result<Vec<TranslationReport>, LingoError> {
    let language = resolve_language(state, requested)?;

    let content = tokio::fs::read_to_string(path).await?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let pb = if show_progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let futures = lines.iter().map(|line| {
        let language = language.clone();
        let pb = pb.as_ref();
        async move {
            let report = translate_one(state, line, &language).await;
            if let Some(pb) = pb {
                pb.inc(1);
            }
            report
        }
    });

    let reports = join_all(futures).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(reports)
}
