//! Organization repository listing.
//!
//! Walks the "list organization repositories" endpoint page by page until
//! GitHub returns an empty page.

mod error;

pub use error::ListingError;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

/// Results per page for the repository listing.
pub const REPOSITORIES_PER_PAGE: u8 = 100;

/// Query parameters for one listing page.
#[derive(Debug, Serialize)]
struct RepositoryPageQuery {
    per_page: u8,
    page: u32,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// The only field of a repository entry the bot reads.
#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    name: String,
}

/// Lists the names of all public repositories in an organization.
///
/// Pages are requested with a page counter starting at 1 and stop at the
/// first empty page, so `R` repositories cost `R / 100 + 1` requests
/// (rounded up). Names keep GitHub's order and are not deduplicated.
///
/// # Errors
///
/// Returns [`ListingError`] if any page request fails.
pub async fn list_repositories(octocrab: &Octocrab, org: &str) -> Result<Vec<String>, ListingError> {
    let span = info_span!("list_repositories", org = %org);

    async {
        info!("Listing organization repositories");

        let route = format!("/orgs/{org}/repos");
        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let query = RepositoryPageQuery {
                per_page: REPOSITORIES_PER_PAGE,
                page,
                kind: "public",
            };
            let entries: Vec<RepositoryEntry> = octocrab.get(&route, Some(&query)).await?;
            debug!(page, count = entries.len(), "Fetched repository page");

            if entries.is_empty() {
                break;
            }

            names.extend(entries.into_iter().map(|entry| entry.name));
            page += 1;
        }

        info!(count = names.len(), "Listing complete");
        Ok(names)
    }
    .instrument(span)
    .await
}
