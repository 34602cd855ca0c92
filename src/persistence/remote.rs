use super::error::RemoteSaveError;
use super::records::MarkerRecord;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One section of a server-generated natural-language report.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarySection {
    pub title: String,
    pub content: String,
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    password: &'a str,
    data: &'a [MarkerRecord],
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    status: String,
    #[serde(default)]
    filepath: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    status: String,
    #[serde(default)]
    data: Option<Vec<MarkerRecord>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    status: String,
    #[serde(default)]
    sections: Option<Vec<SummarySection>>,
    #[serde(default)]
    error: Option<String>,
}

fn rejection(error: Option<String>) -> RemoteSaveError {
    RemoteSaveError::Rejected(error.unwrap_or_else(|| "unspecified server error".to_string()))
}

fn decode_save(response: SaveResponse) -> Result<String, RemoteSaveError> {
    if response.status == "success" {
        Ok(response.filepath.unwrap_or_default())
    } else {
        Err(rejection(response.error))
    }
}

fn decode_load(response: LoadResponse) -> Result<Vec<MarkerRecord>, RemoteSaveError> {
    if response.status == "success" {
        Ok(response.data.unwrap_or_default())
    } else {
        Err(rejection(response.error))
    }
}

fn decode_summary(response: SummaryResponse) -> Result<Vec<SummarySection>, RemoteSaveError> {
    if response.status == "success" {
        Ok(response.sections.unwrap_or_default())
    } else {
        Err(rejection(response.error))
    }
}

/// Client for the shared-secret persistence server.
///
/// Every call takes the password explicitly; the secret belongs to the
/// caller, not the client. Calls block; the app runs them on spawned
/// threads and collects [`RemoteEvent`]s over a channel.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self, RemoteSaveError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteSaveError>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteSaveError::Status(status.as_u16()));
        }
        Ok(response.json()?)
    }

    /// `POST /save_data` with the canonical nested `{password, data}` body.
    /// Returns the filepath the server stored the day under.
    pub fn save_markers(
        &self,
        password: &str,
        records: &[MarkerRecord],
    ) -> Result<String, RemoteSaveError> {
        let response = self.post(
            "/save_data",
            &SaveRequest {
                password,
                data: records,
            },
        )?;
        decode_save(response)
    }

    /// `POST /load_data`. An empty day comes back as an empty sequence; the
    /// caller decides whether to fall back to the local store.
    pub fn load_markers(&self, password: &str) -> Result<Vec<MarkerRecord>, RemoteSaveError> {
        let response = self.post("/load_data", &AuthRequest { password })?;
        decode_load(response)
    }

    /// `POST /generate_daily_summary` over the current records.
    pub fn daily_summary(
        &self,
        password: &str,
        records: &[MarkerRecord],
    ) -> Result<Vec<SummarySection>, RemoteSaveError> {
        let response = self.post(
            "/generate_daily_summary",
            &SaveRequest {
                password,
                data: records,
            },
        )?;
        decode_summary(response)
    }

    /// `POST /generate_weekly_report`.
    pub fn weekly_report(&self, password: &str) -> Result<Vec<SummarySection>, RemoteSaveError> {
        let response = self.post("/generate_weekly_report", &AuthRequest { password })?;
        decode_summary(response)
    }
}

/// Outcome of a background remote call, delivered over the app's channel.
#[derive(Debug)]
pub enum RemoteEvent {
    SaveFinished(Result<String, RemoteSaveError>),
    SummaryFinished(Result<Vec<SummarySection>, RemoteSaveError>),
    WeeklyFinished(Result<Vec<SummarySection>, RemoteSaveError>),
}

/// Fire a save on a background thread.
///
/// Saves are not serialized against each other; a later save can land before
/// an earlier one. The local day file stays authoritative on load, which
/// bounds the exposure to the server-side copy.
pub fn spawn_save(
    client: RemoteClient,
    password: String,
    records: Vec<MarkerRecord>,
    events: Sender<RemoteEvent>,
) {
    thread::spawn(move || {
        let result = client.save_markers(&password, &records);
        let _ = events.send(RemoteEvent::SaveFinished(result));
    });
}

/// Fire a daily-summary request on a background thread.
pub fn spawn_daily_summary(
    client: RemoteClient,
    password: String,
    records: Vec<MarkerRecord>,
    events: Sender<RemoteEvent>,
) {
    thread::spawn(move || {
        let result = client.daily_summary(&password, &records);
        let _ = events.send(RemoteEvent::SummaryFinished(result));
    });
}

/// Fire a weekly-report request on a background thread.
pub fn spawn_weekly_report(client: RemoteClient, password: String, events: Sender<RemoteEvent>) {
    thread::spawn(move || {
        let result = client.weekly_report(&password);
        let _ = events.send(RemoteEvent::WeeklyFinished(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_save_success() {
        let response: SaveResponse =
            serde_json::from_str(r#"{"status":"success","filepath":"data/2026-08-04.json"}"#)
                .unwrap();
        assert_eq!(decode_save(response).unwrap(), "data/2026-08-04.json");
    }

    #[test]
    fn test_decode_save_rejection_carries_detail() {
        let response: SaveResponse =
            serde_json::from_str(r#"{"status":"error","error":"wrong password"}"#).unwrap();
        match decode_save(response) {
            Err(RemoteSaveError::Rejected(detail)) => assert_eq!(detail, "wrong password"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_save_rejection_without_detail() {
        let response: SaveResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        match decode_save(response) {
            Err(RemoteSaveError::Rejected(detail)) => {
                assert_eq!(detail, "unspecified server error")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_load_success_and_empty() {
        let response: LoadResponse = serde_json::from_str(
            r#"{"status":"success","data":[{"position":25.0,"content":"写代码 #work"}]}"#,
        )
        .unwrap();
        let records = decode_load(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, 25.0);

        // A success with no data field is an empty day, not an error.
        let empty: LoadResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(decode_load(empty).unwrap().is_empty());
    }

    #[test]
    fn test_decode_summary_sections() {
        let response: SummaryResponse = serde_json::from_str(
            r#"{"status":"success","sections":[{"title":"Focus","content":"Six hours of coding."}]}"#,
        )
        .unwrap();
        let sections = decode_summary(response).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Focus");
    }

    #[test]
    fn test_save_request_wire_shape_is_nested() {
        let records = vec![MarkerRecord {
            position: 50.0,
            content: "午休".to_string(),
        }];
        let body = serde_json::to_value(SaveRequest {
            password: "secret",
            data: &records,
        })
        .unwrap();

        assert_eq!(body["password"], "secret");
        assert_eq!(body["data"][0]["position"], 50.0);
        assert_eq!(body["data"][0]["content"], "午休");
    }
}
