//! Blocking HTTP implementation of [`ExpenseApi`]

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{search_query, summary_query, ExpenseApi};
use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{
    Advisory, AdvisoryKind, Category, CategoryTrend, Expense, ExpenseId, FilterSpec,
    FilterSummary, MonthlyStat, NewExpense, StatsSummary, UploadKind, UploadResult,
};

/// Expense API client over blocking HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> TallyResult<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TallyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> TallyResult<Self> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> TallyResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TallyError::Config(format!("Invalid API path '{}': {}", path, e)))
    }

    fn expense_url(&self, id: &ExpenseId) -> TallyResult<Url> {
        let mut url = self.url("expenses")?;
        url.path_segments_mut()
            .map_err(|_| TallyError::Config("API base URL cannot carry a path".into()))?
            .push(id.as_str());
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> TallyResult<Response> {
        debug!(request = what, "sending request");
        request
            .send()
            .map_err(|e| TallyError::Http(format!("{} failed: {}", what, e)))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> TallyResult<T> {
        let url = self.url(path)?;
        let response = self.send(self.http.get(url).query(query), path)?;
        read_json(response, None)
    }
}

/// Make sure the base URL ends with a slash so relative joins keep its path
fn normalize_base_url(base_url: &str) -> TallyResult<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}/", trimmed))
        .map_err(|e| TallyError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TallyError::Config(format!(
            "Unsupported scheme '{}' for API base URL",
            other
        ))),
    }
}

/// Decode a success body or map the failure status onto [`TallyError`]
fn read_json<T: DeserializeOwned>(response: Response, not_found: Option<&str>) -> TallyResult<T> {
    let response = check_status(response, not_found)?;
    response
        .json()
        .map_err(|e| TallyError::Json(format!("Unexpected response body: {}", e)))
}

fn check_status(response: Response, not_found: Option<&str>) -> TallyResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(status_error(status, &body, not_found))
}

fn status_error(status: StatusCode, body: &str, not_found: Option<&str>) -> TallyError {
    let message = error_detail(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    match status {
        StatusCode::NOT_FOUND => TallyError::expense_not_found(not_found.unwrap_or(&message)),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            TallyError::Validation(message)
        }
        _ => TallyError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull a readable message out of `{"detail": ...}` error bodies
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

impl ExpenseApi for HttpApi {
    fn categories(&self) -> TallyResult<Vec<Category>> {
        self.get_json("categories", &[])
    }

    fn expenses(&self) -> TallyResult<Vec<Expense>> {
        self.get_json("expenses", &[])
    }

    fn expense(&self, id: &ExpenseId) -> TallyResult<Expense> {
        let url = self.expense_url(id)?;
        let response = self.send(self.http.get(url), "expenses/{id}")?;
        read_json(response, Some(id.as_str()))
    }

    fn create_expense(&self, body: &NewExpense) -> TallyResult<Expense> {
        let url = self.url("expenses")?;
        let response = self.send(self.http.post(url).json(body), "POST expenses")?;
        read_json(response, None)
    }

    fn delete_expense(&self, id: &ExpenseId) -> TallyResult<()> {
        let url = self.expense_url(id)?;
        let response = self.send(self.http.delete(url), "DELETE expenses/{id}")?;
        check_status(response, Some(id.as_str()))?;
        Ok(())
    }

    fn search_expenses(&self, spec: &FilterSpec) -> TallyResult<Vec<Expense>> {
        self.get_json("expenses/search", &search_query(spec))
    }

    fn filter_summary(&self, spec: &FilterSpec) -> TallyResult<FilterSummary> {
        self.get_json("expenses/summary", &summary_query(spec))
    }

    fn stats_summary(&self) -> TallyResult<StatsSummary> {
        self.get_json("expenses/stats/summary", &[])
    }

    fn stats_monthly(&self) -> TallyResult<Vec<MonthlyStat>> {
        self.get_json("expenses/stats/monthly", &[])
    }

    fn stats_trends(&self) -> TallyResult<Vec<CategoryTrend>> {
        self.get_json("expenses/stats/trends", &[])
    }

    fn advisory(&self, kind: AdvisoryKind) -> TallyResult<Advisory> {
        let path = match kind {
            AdvisoryKind::Insights => "expenses/insights",
            AdvisoryKind::Predictions => "expenses/predictions",
            AdvisoryKind::Limits => "expenses/limits/check",
        };
        self.get_json(path, &[])
    }

    fn upload(
        &self,
        kind: UploadKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> TallyResult<UploadResult> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(kind.mime_type())
            .map_err(|e| TallyError::Http(format!("Invalid upload content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let url = self.url(kind.endpoint())?;
        let response = self.send(self.http.post(url).multipart(form), kind.endpoint())?;
        read_json(response, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_prefix() {
        let api = HttpApi::new("http://localhost:8001/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.url("expenses/stats/summary").unwrap().as_str(),
            "http://localhost:8001/api/expenses/stats/summary"
        );

        let trailing = HttpApi::new("http://localhost:8001/api///", Duration::from_secs(1)).unwrap();
        assert_eq!(trailing.base_url().as_str(), "http://localhost:8001/api/");
    }

    #[test]
    fn test_expense_url_escapes_id() {
        let api = HttpApi::new("http://localhost:8001/api", Duration::from_secs(1)).unwrap();
        let url = api.expense_url(&ExpenseId::new("a b/c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api/expenses/a%20b%2Fc");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpApi::new("ftp://example.com", Duration::from_secs(1)),
            Err(TallyError::Config(_))
        ));
        assert!(HttpApi::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_status_mapping() {
        let not_found = status_error(StatusCode::NOT_FOUND, r#"{"detail":"Expense not found"}"#, Some("42"));
        assert_eq!(not_found.to_string(), "Expense not found: 42");

        let invalid = status_error(StatusCode::BAD_REQUEST, r#"{"detail":"Invalid category"}"#, None);
        assert!(invalid.is_validation());
        assert_eq!(invalid.to_string(), "Validation error: Invalid category");

        let unprocessable = status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"msg":"field required"},{"msg":"value is not a valid float"}]}"#,
            None,
        );
        assert_eq!(
            unprocessable.to_string(),
            "Validation error: field required; value is not a valid float"
        );

        let server = status_error(StatusCode::INTERNAL_SERVER_ERROR, "oops", None);
        assert!(matches!(server, TallyError::Api { status: 500, .. }));
    }
}
