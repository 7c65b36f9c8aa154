use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{HistoryRequest, PriceSource, RawPriceRow, SourceError};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::UtcDateTime;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const COOKIE_ENV: &str = "YAHOO_COOKIE";

/// Yahoo Finance chart endpoint adapter for daily closes.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(
            Arc::new(ReqwestHttpClient::default()),
            HttpAuth::cookie_from_env(COOKIE_ENV),
        )
    }
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, auth: HttpAuth) -> Self {
        Self {
            http_client,
            auth,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn chart_url(&self, req: &HistoryRequest) -> String {
        let period1 = UtcDateTime::start_of_day(req.range.start()).unix_timestamp();
        let period2 = UtcDateTime::start_of_day(req.range.end()).unix_timestamp();
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            period1,
            period2,
        )
    }

    async fn fetch_chart(&self, req: &HistoryRequest) -> Result<Vec<RawPriceRow>, SourceError> {
        let request = HttpRequest::get(self.chart_url(req))
            .with_header("referer", "https://finance.yahoo.com/")
            .with_auth(&self.auth);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            return Err(status_error(&response));
        }

        parse_chart_body(&response.body)
    }
}

impl PriceSource for YahooAdapter {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn daily_closes<'a>(
        &'a self,
        req: &'a HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPriceRow>, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_chart(req).await })
    }
}

fn status_error(response: &HttpResponse) -> SourceError {
    // Yahoo usually explains rejections in the chart error object.
    let detail = serde_json::from_str::<YahooChartResponse>(&response.body)
        .ok()
        .and_then(|parsed| parsed.chart.error)
        .map(|error| error.describe());

    match (response.status, detail) {
        (404, Some(detail)) => SourceError::not_found(detail),
        (404, None) => SourceError::not_found("yahoo has no chart for this symbol"),
        (429, _) => SourceError::rate_limited("yahoo rate limited the chart request"),
        (400 | 422, Some(detail)) => SourceError::invalid_request(detail),
        (status, Some(detail)) => {
            SourceError::unavailable(format!("yahoo returned status {status}: {detail}"))
        }
        (status, None) => SourceError::unavailable(format!("yahoo returned status {status}")),
    }
}

fn parse_chart_body(body: &str) -> Result<Vec<RawPriceRow>, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::invalid_response(format!("failed to parse yahoo chart: {e}"))
    })?;

    if let Some(error) = chart_response.chart.error {
        return Err(SourceError::not_found(error.describe()));
    }

    let result = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::invalid_response("no chart data in response"))?;

    // No timestamps means the window held no trading sessions.
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|quote| quote.close)
        .ok_or_else(|| SourceError::invalid_response("no quote data in chart"))?;

    if closes.len() != timestamps.len() {
        return Err(SourceError::invalid_response(format!(
            "chart has {} timestamps but {} closes",
            timestamps.len(),
            closes.len()
        )));
    }

    let utc_offset_seconds = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);

    Ok(timestamps
        .into_iter()
        .zip(closes)
        .map(|(timestamp, close)| RawPriceRow {
            timestamp,
            utc_offset_seconds,
            close,
        })
        .collect())
}

// Yahoo Finance chart response structures
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn describe(self) -> String {
        match (self.code, self.description) {
            (_, Some(description)) if !description.is_empty() => description,
            (Some(code), _) => code,
            _ => String::from("yahoo chart API error"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
