//! HTTP implementation of [`ExpenseApi`]
//!
//! Uses a blocking reqwest client: the CLI performs one request per user
//! action and waits for it.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::{Credentials, ExpenseApi};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseId, ExpenseInput, Money, UserId};
use crate::storage::Session;

/// Body of create and update requests
#[derive(Debug, Serialize)]
struct ExpensePayload<'a> {
    title: &'a str,
    amount: Money,
    category: &'a Category,
    date: NaiveDate,
    #[serde(rename = "userId")]
    user_id: &'a UserId,
}

impl<'a> ExpensePayload<'a> {
    fn new(input: &'a ExpenseInput, user_id: &'a UserId) -> Self {
        Self {
            title: &input.title,
            amount: input.amount,
            category: &input.category,
            date: input.date,
            user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Which request a response belongs to, for error mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint<'a> {
    Login,
    Register,
    Expenses,
    Expense(&'a ExpenseId),
}

/// Client for the remote expense API
#[derive(Debug, Clone)]
pub struct HttpExpenseApi {
    client: Client,
    base_url: Url,
}

impl HttpExpenseApi {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ExpenseResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ExpenseError::Config(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ExpenseError::Config(format!(
                "Invalid API base URL '{}'",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("expense-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExpenseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// The API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        tracing::debug!(%method, %url, "sending API request");
        self.client.request(method, url)
    }

    fn authorized(&self, method: Method, segments: &[&str], session: &Session) -> RequestBuilder {
        self.request(method, segments).bearer_auth(&session.token)
    }
}

impl ExpenseApi for HttpExpenseApi {
    fn login(&self, credentials: &Credentials) -> ExpenseResult<String> {
        let response = self
            .request(Method::POST, &["login"])
            .json(credentials)
            .send()?;
        let body: LoginResponse = check_status(response, Endpoint::Login)?.json()?;
        Ok(body.token)
    }

    fn register(&self, credentials: &Credentials) -> ExpenseResult<()> {
        let response = self
            .request(Method::POST, &["register"])
            .json(credentials)
            .send()?;
        check_status(response, Endpoint::Register)?;
        Ok(())
    }

    fn list_expenses(&self, session: &Session) -> ExpenseResult<Vec<Expense>> {
        let response = self
            .authorized(Method::GET, &["expenses"], session)
            .query(&[("userId", session.user_id.as_str())])
            .send()?;
        let expenses: Vec<Expense> = check_status(response, Endpoint::Expenses)?.json()?;
        tracing::debug!(count = expenses.len(), "fetched expenses");
        Ok(expenses)
    }

    fn create_expense(&self, session: &Session, input: &ExpenseInput) -> ExpenseResult<Expense> {
        let response = self
            .authorized(Method::POST, &["expenses"], session)
            .json(&ExpensePayload::new(input, &session.user_id))
            .send()?;
        Ok(check_status(response, Endpoint::Expenses)?.json()?)
    }

    fn update_expense(
        &self,
        session: &Session,
        id: &ExpenseId,
        input: &ExpenseInput,
    ) -> ExpenseResult<Expense> {
        let response = self
            .authorized(Method::PUT, &["expenses", id.as_str()], session)
            .json(&ExpensePayload::new(input, &session.user_id))
            .send()?;
        Ok(check_status(response, Endpoint::Expense(id))?.json()?)
    }

    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> ExpenseResult<()> {
        let response = self
            .authorized(Method::DELETE, &["expenses", id.as_str()], session)
            .send()?;
        check_status(response, Endpoint::Expense(id))?;
        Ok(())
    }
}

/// Turn a non-success response into the matching error
fn check_status(response: Response, endpoint: Endpoint<'_>) -> ExpenseResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let error = map_status(status, &body, endpoint);
    tracing::warn!(status = status.as_u16(), error = %error, "API request failed");
    Err(error)
}

fn map_status(status: StatusCode, body: &str, endpoint: Endpoint<'_>) -> ExpenseError {
    match (status, endpoint) {
        (StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, Endpoint::Login) => {
            ExpenseError::InvalidCredentials
        }
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => ExpenseError::Unauthorized,
        (StatusCode::NOT_FOUND, Endpoint::Expense(id)) => ExpenseError::expense_not_found(id.as_str()),
        _ => ExpenseError::Api {
            status: status.as_u16(),
            message: error_message(status, body),
        },
    }
}

/// Pull a readable message out of an error body
///
/// Express-style APIs answer with `{"message": ...}` or `{"error": ...}`, or
/// with plain text.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }

    let text = body.trim();
    if text.is_empty() || text.starts_with('<') {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpExpenseApi {
        HttpExpenseApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_building() {
        let local = api("http://localhost:5000");
        assert_eq!(local.url(&["expenses"]).as_str(), "http://localhost:5000/expenses");

        let prefixed = api("https://example.com/api/");
        assert_eq!(
            prefixed.url(&["expenses", "abc 1"]).as_str(),
            "https://example.com/api/expenses/abc%201"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpExpenseApi::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(ExpenseError::Config(_))));

        let result = HttpExpenseApi::new("mailto:someone@example.com", Duration::from_secs(5));
        assert!(matches!(result, Err(ExpenseError::Config(_))));
    }

    #[test]
    fn test_login_failures_are_invalid_credentials() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED] {
            assert!(matches!(
                map_status(status, "", Endpoint::Login),
                ExpenseError::InvalidCredentials
            ));
        }
    }

    #[test]
    fn test_auth_failures_elsewhere_are_unauthorized() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "", Endpoint::Expenses),
            ExpenseError::Unauthorized
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, "", Endpoint::Register),
            ExpenseError::Unauthorized
        ));
    }

    #[test]
    fn test_missing_expense_is_not_found() {
        let id = ExpenseId::new("abc");
        let err = map_status(StatusCode::NOT_FOUND, "", Endpoint::Expense(&id));
        assert_eq!(err.to_string(), "Expense not found: abc");
    }

    #[test]
    fn test_other_statuses_carry_message() {
        let err = map_status(
            StatusCode::CONFLICT,
            r#"{"message":"User already exists"}"#,
            Endpoint::Register,
        );
        assert_eq!(err.to_string(), "API error (409): User already exists");

        let err = map_status(StatusCode::INTERNAL_SERVER_ERROR, "", Endpoint::Expenses);
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");

        let err = map_status(StatusCode::BAD_GATEWAY, "<html>oops</html>", Endpoint::Expenses);
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");

        let err = map_status(StatusCode::BAD_REQUEST, "amount is required", Endpoint::Expenses);
        assert_eq!(err.to_string(), "API error (400): amount is required");
    }

    #[test]
    fn test_payload_shape() {
        let input = ExpenseInput::new(
            "Lunch",
            Money::from_cents(1250),
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        let user_id = UserId::new("u-1");
        let json = serde_json::to_value(ExpensePayload::new(&input, &user_id)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Lunch",
                "amount": 12.5,
                "category": "Food",
                "date": "2024-01-15",
                "userId": "u-1"
            })
        );
    }
}
