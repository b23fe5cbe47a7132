//! README fetching and plain-language summarization.
//!
//! The README is fetched from GitHub, decoded from base64, truncated to a
//! fixed character budget and handed to a [`Completer`] with a fixed prompt.

mod error;

pub use error::ReadmeError;

use crate::llm::Completer;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info, info_span, Instrument};

/// Reply used when a repository has no readable README.
pub const README_FALLBACK: &str = "README not found or empty.";

/// Maximum number of README characters forwarded to the model.
pub const README_CHAR_LIMIT: usize = 3000;

/// README metadata; only the encoded content is read.
#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizes a repository README in plain language.
///
/// Returns [`README_FALLBACK`] without calling the model when GitHub answers
/// with a non-success status, the response has no `content`, or the decoded
/// text is blank.
///
/// # Errors
///
/// Returns [`ReadmeError`] on transport failures, undecodable content, or a
/// failed completion.
pub async fn summarize_readme<C: Completer>(
    octocrab: &Octocrab,
    completer: &C,
    org: &str,
    repo: &str,
) -> Result<String, ReadmeError> {
    let span = info_span!("summarize_readme", org = %org, repo = %repo);

    async {
        let Some(readme) = fetch_readme(octocrab, org, repo).await? else {
            info!("No README to summarize");
            return Ok(README_FALLBACK.to_string());
        };

        let excerpt = truncate_chars(&readme, README_CHAR_LIMIT);
        debug!(
            readme_chars = readme.chars().count(),
            excerpt_chars = excerpt.chars().count(),
            "Requesting README summary"
        );

        let summary = completer.complete(build_prompt(excerpt)).await?;
        info!("README summarized");
        Ok(summary)
    }
    .instrument(span)
    .await
}

/// Fetches and decodes a repository README.
///
/// Returns `Ok(None)` when GitHub answers with a non-success status
/// (whatever the body looks like), the content field is missing, or the
/// decoded text is blank.
///
/// # Errors
///
/// Returns [`ReadmeError`] on transport failures, an unparsable success
/// body, or invalid base64.
pub async fn fetch_readme(
    octocrab: &Octocrab,
    org: &str,
    repo: &str,
) -> Result<Option<String>, ReadmeError> {
    let route = format!("/repos/{org}/{repo}/readme");
    let response = octocrab._get(route).await?;

    let status = response.status();
    if !status.is_success() {
        debug!(status = %status, "README unavailable");
        return Ok(None);
    }

    let body = octocrab.body_to_string(response).await?;
    let readme: ReadmeResponse = serde_json::from_str(&body)?;
    let Some(content) = readme.content else {
        return Ok(None);
    };

    let text = decode_content(&content)?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

/// Decodes GitHub's line-wrapped base64 content into text.
fn decode_content(content: &str) -> Result<String, ReadmeError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Returns at most the first `limit` characters of `text`.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Builds the summarization prompt around a README excerpt.
fn build_prompt(readme: &str) -> String {
    format!(
        "Summarize the following README in plain language for someone who is not a developer.\n\
Explain in three to five sentences what the project does, who it is for, and how it is used.\n\
Do not include code, commands, or markup in your answer.\n\
\n\
README:\n\
{readme}"
    )
}
