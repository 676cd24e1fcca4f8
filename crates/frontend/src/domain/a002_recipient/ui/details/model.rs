use crate::shared::api_utils::api_url;
use contracts::domain::a001_award::Award;
use contracts::domain::a002_recipient::{RecipientDto, RecipientId};
use contracts::domain::a004_pecsf_charity::PecsfCharity;
use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Request failed: {}", e)))?;
    check(response)
}

fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::from_status(
            response.status(),
            format!("HTTP {}: {}", response.status(), response.status_text()),
        ))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::invalid_data(format!("Failed to parse response: {}", e)))
}

/// Raw registration record; `None` when the server has no such recipient
pub async fn fetch_recipient(base: &str, id: &str) -> Result<Option<Value>, ApiError> {
    let url = api_url(base, &format!("/api/recipients/{}", id));
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Request failed: {}", e)))?;
    if response.status() == 404 {
        return Ok(None);
    }
    let record = read_json(check(response)?).await?;
    Ok(Some(record))
}

/// Creates or updates the recipient, returning the stored record
pub async fn save_recipient(base: &str, dto: &RecipientDto) -> Result<RecipientDto, ApiError> {
    let request = match dto.id {
        Some(id) => Request::put(&api_url(base, &format!("/api/recipients/{}", id))),
        None => Request::post(&api_url(base, "/api/recipients")),
    };
    let response = request
        .header("Accept", "application/json")
        .json(dto)
        .map_err(|e| ApiError::invalid_data(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Request failed: {}", e)))?;
    read_json(check(response)?).await
}

pub async fn delete_recipient(base: &str, id: RecipientId) -> Result<(), ApiError> {
    let url = api_url(base, &format!("/api/recipients/{}", id));
    send(Request::delete(&url)).await?;
    Ok(())
}

/// Active awards offered for `milestone`
pub async fn fetch_awards(base: &str, milestone: u32) -> Result<Vec<Award>, ApiError> {
    let url = api_url(base, &format!("/api/awards?milestone={}", milestone));
    let awards: Vec<Award> = read_json(send(Request::get(&url)).await?).await?;
    Ok(awards.into_iter().filter(|a| a.active).collect())
}

pub async fn fetch_pecsf_charities(base: &str) -> Result<Vec<PecsfCharity>, ApiError> {
    let url = api_url(base, "/api/pecsf/charities");
    read_json(send(Request::get(&url)).await?).await
}
