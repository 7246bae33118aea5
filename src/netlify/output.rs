//! Parsing of `netlify` CLI output.

use std::sync::OnceLock;

use chrono::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of sites reported by [`parse_sites`].
pub const MAX_SITES: usize = 10;

fn netlify_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https://\S+netlify\S*").expect("valid URL regex"))
}

/// Extract the site URL printed by `netlify deploy`.
///
/// Lines mentioning "website" and "url" win over "deploy" + "url" lines;
/// bare netlify URLs are used when nothing labelled is found. Later
/// matches replace earlier ones.
pub fn extract_deploy_url(output: &str) -> Option<String> {
    let mut url: Option<String> = None;
    let mut deploy_url: Option<String> = None;

    for line in output.lines() {
        let lower = line.to_lowercase();
        if lower.contains("website") && lower.contains("url") {
            if let Some(last) = line.split_whitespace().last() {
                url = Some(last.to_string());
            }
        } else if lower.contains("deploy") && lower.contains("url") {
            if let Some(last) = line.split_whitespace().last() {
                deploy_url = Some(last.to_string());
            }
        } else if line.contains("https://") && line.contains("netlify") {
            if let Some(m) = netlify_url_regex().find(line) {
                url = Some(m.as_str().to_string());
            }
        }
    }

    url.or(deploy_url)
}

/// `netlify status` reports an authenticated user.
pub fn is_logged_in(stdout: &str) -> bool {
    stdout.to_lowercase().contains("logged in")
}

/// `netlify login` output indicates success.
pub fn login_succeeded(output: &str) -> bool {
    output.contains("Successfully") || output.to_lowercase().contains("logged in")
}

/// `netlify status` shows a linked site.
pub fn is_site_linked(stdout: &str) -> bool {
    stdout.contains("Current site")
}

/// `netlify sites:create` output indicates a created or linked site.
pub fn site_created(output: &str) -> bool {
    ["Project Created", "Site Created", "Linked to"]
        .iter()
        .any(|marker| output.contains(marker))
}

/// `netlify sites:update` output indicates a rename.
pub fn site_updated(stdout: &str) -> bool {
    stdout.contains("Site updated")
}

/// A site from `netlify sites:list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub url: String,
    pub updated: String,
}

/// A team from `netlify teams:list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub slug: String,
    pub id: String,
}

#[derive(Deserialize)]
struct RawSite {
    name: Option<String>,
    ssl_url: Option<String>,
    url: Option<String>,
    updated_at: Option<String>,
}

#[derive(Deserialize)]
struct RawTeam {
    name: Option<String>,
    slug: Option<String>,
    id: Option<String>,
}

/// Parse a JSON array, skipping any banner text printed before it.
fn parse_json_array<T: serde::de::DeserializeOwned>(stdout: &str) -> serde_json::Result<Vec<T>> {
    let trimmed = stdout.trim();
    match serde_json::from_str(trimmed) {
        Ok(v) => Ok(v),
        Err(e) => match trimmed.find('[') {
            Some(start) if start > 0 => serde_json::from_str(&trimmed[start..]),
            _ => Err(e),
        },
    }
}

fn short_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => raw.chars().take(10).collect(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse `netlify sites:list --json`, keeping the first [`MAX_SITES`].
pub fn parse_sites(stdout: &str) -> serde_json::Result<Vec<Site>> {
    let raw: Vec<RawSite> = parse_json_array(stdout)?;
    Ok(raw
        .into_iter()
        .take(MAX_SITES)
        .map(|s| {
            let name = s.name.unwrap_or_default();
            let url = non_empty(s.ssl_url)
                .or_else(|| non_empty(s.url))
                .unwrap_or_else(|| format!("https://{}.netlify.app", name));
            Site {
                name: if name.is_empty() {
                    "Unknown".to_string()
                } else {
                    name
                },
                url,
                updated: s.updated_at.as_deref().map(short_date).unwrap_or_default(),
            }
        })
        .collect())
}

/// Parse `netlify teams:list --json`.
pub fn parse_teams(stdout: &str) -> serde_json::Result<Vec<Team>> {
    let raw: Vec<RawTeam> = parse_json_array(stdout)?;
    Ok(raw
        .into_iter()
        .map(|t| Team {
            name: t.name.unwrap_or_else(|| "Unknown".to_string()),
            slug: t.slug.unwrap_or_default(),
            id: t.id.unwrap_or_default(),
        })
        .collect())
}
