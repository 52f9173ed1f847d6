// SPDX-License-Identifier: Apache-2.0

//! Web console dashboard verification.
//!
//! Authenticates with a session-token cookie, loads the admin dashboard,
//! follows the navigation entry by its visible text, and asserts the heading
//! of the page behind it. The console hostname is discovered from the
//! OpenShift Route unless overridden. UI-structure dependent and therefore
//! fragile to console markup changes.

use kube::api::{ApiResource, DynamicObject, GroupVersionKind};
use kube::{Api, Client};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;
use crate::constants::console::{
    DASHBOARD_PATH, NAV_ENTRY_TEXT, PAGE_HEADING, ROUTE_NAME, ROUTE_NAMESPACE, SESSION_COOKIE,
};
use crate::error::{Error, Result};

/// Discover the console base URL from the `console` Route
#[instrument(skip(client))]
pub async fn discover_console_url(client: &Client) -> Result<Url> {
    let gvk = GroupVersionKind::gvk("route.openshift.io", "v1", "Route");
    let ar = ApiResource::from_gvk(&gvk);
    let routes: Api<DynamicObject> = Api::namespaced_with(client.clone(), ROUTE_NAMESPACE, &ar);

    let route = routes.get(ROUTE_NAME).await?;
    let host = route.data["spec"]["host"].as_str().ok_or_else(|| {
        Error::Console(format!(
            "Route {}/{} has no spec.host",
            ROUTE_NAMESPACE, ROUTE_NAME
        ))
    })?;

    let url = Url::parse(&format!("https://{}", host))
        .map_err(|e| Error::Console(format!("Invalid console host '{}': {}", host, e)))?;
    info!("Console URL discovered from route: {}", url);
    Ok(url)
}

/// Verify the dashboard is reachable and its navigation entry works.
///
/// The session token is injected as the console's session cookie; no login
/// flow is driven.
#[instrument(skip(client, config, base_url), fields(console = %base_url))]
pub async fn verify_dashboard(
    client: &reqwest::Client,
    config: &Config,
    base_url: &Url,
) -> Result<()> {
    let token = config
        .console_token
        .as_deref()
        .ok_or_else(|| Error::Console("No console session token configured".to_string()))?;

    let dashboard_url = base_url
        .join(DASHBOARD_PATH)
        .map_err(|e| Error::Console(format!("Invalid dashboard path: {}", e)))?;

    let body = fetch_page(client, &dashboard_url, token).await?;
    let href = find_nav_href(&body, NAV_ENTRY_TEXT).ok_or_else(|| {
        Error::Console(format!(
            "Navigation entry '{}' not found on {}",
            NAV_ENTRY_TEXT, dashboard_url
        ))
    })?;
    debug!("Navigation entry '{}' links to {}", NAV_ENTRY_TEXT, href);

    let target_url = base_url
        .join(&href)
        .map_err(|e| Error::Console(format!("Invalid navigation link '{}': {}", href, e)))?;
    let target_body = fetch_page(client, &target_url, token).await?;

    let heading = page_heading(&target_body).ok_or_else(|| {
        Error::Console(format!("No heading found on {}", target_url))
    })?;
    if heading != PAGE_HEADING {
        return Err(Error::Console(format!(
            "Expected heading '{}' on {}, found '{}'",
            PAGE_HEADING, target_url, heading
        )));
    }

    info!("Console dashboard verified via {}", target_url);
    Ok(())
}

/// Build the HTTP client used for console checks
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
        .build()?)
}

async fn fetch_page(client: &reqwest::Client, url: &Url, token: &str) -> Result<String> {
    let response = client
        .get(url.clone())
        .header(
            reqwest::header::COOKIE,
            format!("{}={}", SESSION_COOKIE, token),
        )
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Console(format!(
            "GET {} returned HTTP {}",
            url, status
        )));
    }
    Ok(response.text().await?)
}

/// Find the href of the first anchor whose visible text contains `text`
pub fn find_nav_href(html: &str, text: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").ok()?;

    for element in document.select(&anchors) {
        let visible: String = element.text().collect::<Vec<_>>().join(" ");
        let normalized = visible.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.contains(text) {
            if let Some(href) = element.value().attr("href") {
                return Some(href.to_string());
            }
        }
    }
    None
}

/// Visible text of the page's first h1, whitespace-normalized
pub fn page_heading(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let headings = Selector::parse("h1").ok()?;

    document.select(&headings).next().map(|element| {
        element
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    })
}
