//! GitHub Trending scraper.
//!
//! Fetches `https://github.com/trending/<language>` once with the default
//! locale and once with `?spoken_language_code=zh`, extracts every
//! `article.Box-row` into a [`TrendingEntry`] and merges both pages into a
//! single [`LanguageResult`].
//!
//! # Failure Model
//!
//! Transport failures surface as a [`FetchError`] from
//! [`TrendingClient::fetch_page`]; [`scrape_url`] logs them and degrades to an
//! empty result. Rows without a usable heading link are skipped one by one
//! with a [`RowError`] logged at debug level.

use crate::models::{LanguageResult, TrendingEntry};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Origin used both for trending requests and for repository links.
pub const GITHUB_ORIGIN: &str = "https://github.com";

/// Per-request timeout for trending pages.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Query string selecting the Chinese-localized variant of a trending page.
pub const ZH_LOCALE_QUERY: &str = "spoken_language_code=zh";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.7; rv:11.0) Gecko/20100101 Firefox/11.0";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_ENCODING: &str = "gzip,deflate,sdch";
const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.8";

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.Box article.Box-row").expect("valid row selector"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.lh-condensed").expect("valid heading selector"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.col-9").expect("valid description selector"));

/// Why a trending page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request or body read exceeded the client timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    /// DNS resolution or TCP/TLS connection failed.
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    /// The response body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    /// Any other transport failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label for the failure class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::Connect(_) => "connect",
            FetchError::Status { .. } => "status",
            FetchError::Body(_) => "body",
            FetchError::Request(_) => "request",
        }
    }

    fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else {
            FetchError::Body(e)
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else if e.is_connect() {
            FetchError::Connect(e)
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e)
        } else {
            FetchError::Request(e)
        }
    }
}

/// Why a single trending row was skipped.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no h2.lh-condensed heading")]
    MissingHeading,
    #[error("heading has no anchor")]
    MissingAnchor,
    #[error("anchor has no href")]
    MissingHref,
}

/// HTTP handle shared by every trending request of a run.
///
/// Owns one `reqwest::Client` (and therefore one connection pool) carrying
/// the browser-like default headers and the request timeout.
#[derive(Debug, Clone)]
pub struct TrendingClient {
    http: reqwest::Client,
    origin: String,
}

impl TrendingClient {
    /// Build a client for `base_url` (normally [`GITHUB_ORIGIN`]).
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(BROWSER_ACCEPT_ENCODING));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            origin: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Origin prepended to relative repository links.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Trending page URL for `language`, optionally the zh-locale variant.
    ///
    /// The language is form-encoded (space becomes `+`). The empty language
    /// yields the unfiltered `/trending/` page.
    pub fn trending_url(&self, language: &str, zh_locale: bool) -> String {
        let segment = urlencoding::encode(language).replace("%20", "+");
        let base = format!("{}/trending/{segment}", self.origin);
        if zh_locale {
            format!("{base}?{ZH_LOCALE_QUERY}")
        } else {
            base
        }
    }

    /// GET `url` and return the body of a 2xx response.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        let body = response.text().await.map_err(FetchError::from_body)?;
        debug!(bytes = body.len(), %status, "Fetched trending page");
        Ok(body)
    }
}

/// Extract every trending row of `html` into a [`LanguageResult`].
///
/// Rows are read in document order; a later row with the same title replaces
/// an earlier one. Rows without a heading link are skipped.
pub fn extract_entries(html: &str, origin: &str) -> LanguageResult {
    let document = Html::parse_document(html);
    let rows: Vec<ElementRef> = document.select(&ROW_SELECTOR).collect();
    debug!(count = rows.len(), "Found trending rows");

    let mut result = LanguageResult::new();
    for row in rows {
        match parse_row(row, origin) {
            Ok(entry) => result.insert(entry),
            Err(e) => {
                debug!(
                    reason = %e,
                    row = %truncate_for_log(&row.html(), 500),
                    "Skipping trending row"
                );
            }
        }
    }
    result
}

fn parse_row(row: ElementRef, origin: &str) -> Result<TrendingEntry, RowError> {
    let heading = row
        .select(&HEADING_SELECTOR)
        .next()
        .ok_or(RowError::MissingHeading)?;
    let anchor = heading
        .select(&ANCHOR_SELECTOR)
        .next()
        .ok_or(RowError::MissingAnchor)?;
    let href = anchor.value().attr("href").ok_or(RowError::MissingHref)?;

    let title = anchor
        .text()
        .collect::<String>()
        .trim()
        .replace(['\n', ' '], "");
    let url = format!("{origin}{href}");

    let description = row.select(&DESCRIPTION_SELECTOR).next().map(|p| {
        p.text()
            .collect::<String>()
            .trim()
            .replace(['\r', '\n'], "")
    });

    Ok(TrendingEntry {
        title,
        url,
        description,
    })
}

/// Fetch and extract one trending page; failures degrade to an empty result.
#[instrument(level = "info", skip(client))]
pub async fn scrape_url(client: &TrendingClient, url: &str) -> LanguageResult {
    info!("Scraping URL");
    match client.fetch_page(url).await {
        Ok(html) => {
            let result = extract_entries(&html, client.origin());
            info!(count = result.len(), "Extracted trending entries");
            result
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Trending fetch failed");
            LanguageResult::new()
        }
    }
}

/// Scrape both locale variants of `language` and merge them.
///
/// Entries from the zh-locale page replace default-locale entries with the
/// same title.
#[instrument(level = "info", skip(client))]
pub async fn scrape_language(client: &TrendingClient, language: &str) -> LanguageResult {
    let default_locale = scrape_url(client, &client.trending_url(language, false)).await;
    let zh_locale = scrape_url(client, &client.trending_url(language, true)).await;
    let localized = zh_locale
        .iter()
        .filter(|e| default_locale.get(&e.title).is_some())
        .count();
    let merged = default_locale.merge(zh_locale);
    info!(count = merged.len(), localized, "Merged locale variants");
    merged
}
