//! Google Sheets v4 backend.
//!
//! Authenticates as a service account: a short-lived RS256 JWT is
//! exchanged at the key's `token_uri` for a bearer token, which is cached
//! until shortly before expiry. Every trait call maps onto one Sheets
//! REST request; failures surface as `ServiceError::Connection` and are
//! never retried.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use super::SheetBackend;
use crate::errors::ServiceError;

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Refresh the cached token this long before it actually expires.
const TOKEN_SLACK: Duration = Duration::from_secs(60);

#[derive(Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize, Default)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

pub struct GoogleSheets {
    http: reqwest::Client,
    spreadsheet_id: String,
    credentials_file: PathBuf,
    key: RwLock<Option<ServiceAccountKey>>,
    token: RwLock<Option<CachedToken>>,
    // title -> numeric sheet id, needed for row deletion
    sheet_ids: RwLock<HashMap<String, i64>>,
}

fn transport<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Connection(e.to_string())
}

/// Spreadsheet column letter for a 1-based index (1 -> A, 27 -> AA).
fn col_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

impl GoogleSheets {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(spreadsheet_id: S, credentials_file: P) -> Self {
        Self {
            http: reqwest::Client::new(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials_file: credentials_file.into(),
            key: RwLock::new(None),
            token: RwLock::new(None),
            sheet_ids: RwLock::new(HashMap::new()),
        }
    }

    fn base_url(&self) -> String {
        format!("https://sheets.googleapis.com/v4/spreadsheets/{}", self.spreadsheet_id)
    }

    async fn load_key(&self) -> Result<ServiceAccountKey, ServiceError> {
        if let Some(key) = self.key.read().await.as_ref() {
            return Ok(key.clone());
        }
        let raw = tokio::fs::read_to_string(&self.credentials_file)
            .await
            .map_err(|e| {
                ServiceError::Connection(format!(
                    "cannot read credentials file {}: {e}",
                    self.credentials_file.display()
                ))
            })?;
        let key: ServiceAccountKey = serde_json::from_str(&raw)
            .map_err(|e| ServiceError::Connection(format!("invalid service account key: {e}")))?;
        *self.key.write().await = Some(key.clone());
        Ok(key)
    }

    async fn access_token(&self) -> Result<String, ServiceError> {
        if let Some(tok) = self.token.read().await.as_ref() {
            if tok.expires_at > Instant::now() + TOKEN_SLACK {
                return Ok(tok.access_token.clone());
            }
        }

        let key = self.load_key().await?;
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let claims = Claims { iss: &key.client_email, scope: SCOPE, aud: &key.token_uri, iat, exp: iat + 3600 };
        let signer = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| ServiceError::Connection(format!("invalid private key: {e}")))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signer)
            .map_err(|e| ServiceError::Connection(format!("cannot sign auth token: {e}")))?;

        let resp = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        let tok: TokenResponse = resp.json().await.map_err(transport)?;

        debug!(expires_in = tok.expires_in, "obtained sheets access token");
        *self.token.write().await = Some(CachedToken {
            access_token: tok.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(tok.expires_in),
        });
        Ok(tok.access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ServiceError> {
        let token = self.access_token().await?;
        self.http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json::<T>()
            .await
            .map_err(transport)
    }

    async fn send_json(&self, req: reqwest::RequestBuilder, body: &serde_json::Value) -> Result<(), ServiceError> {
        let token = self.access_token().await?;
        req.bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Ok(())
    }

    /// Fetch tab properties and refresh the title -> sheet-id cache.
    async fn refresh_sheet_ids(&self) -> Result<Vec<String>, ServiceError> {
        let meta: SpreadsheetMeta =
            self.get_json(format!("{}?fields=sheets.properties", self.base_url())).await?;
        let mut titles = Vec::with_capacity(meta.sheets.len());
        let mut ids = HashMap::with_capacity(meta.sheets.len());
        for sheet in meta.sheets {
            titles.push(sheet.properties.title.clone());
            ids.insert(sheet.properties.title, sheet.properties.sheet_id);
        }
        *self.sheet_ids.write().await = ids;
        Ok(titles)
    }

    async fn sheet_id(&self, tab: &str) -> Result<i64, ServiceError> {
        if let Some(id) = self.sheet_ids.read().await.get(tab) {
            return Ok(*id);
        }
        self.refresh_sheet_ids().await?;
        self.sheet_ids
            .read()
            .await
            .get(tab)
            .copied()
            .ok_or_else(|| ServiceError::Connection(format!("no such tab: {tab}")))
    }
}

#[async_trait]
impl SheetBackend for GoogleSheets {
    /// Validates credentials and primes the sheet-id cache.
    async fn connect(&self) -> Result<(), ServiceError> {
        self.refresh_sheet_ids().await?;
        Ok(())
    }

    async fn tab_titles(&self) -> Result<Vec<String>, ServiceError> {
        self.refresh_sheet_ids().await
    }

    async fn add_tab(&self, title: &str, cols: usize) -> Result<(), ServiceError> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": 1000, "columnCount": cols }
                    }
                }
            }]
        });
        self.send_json(self.http.post(format!("{}:batchUpdate", self.base_url())), &body)
            .await?;
        self.refresh_sheet_ids().await?;
        Ok(())
    }

    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        let range: ValueRange =
            self.get_json(format!("{}/values/{}", self.base_url(), tab)).await?;
        Ok(range.values)
    }

    async fn read_row(&self, tab: &str, row: usize) -> Result<Vec<String>, ServiceError> {
        let range: ValueRange = self
            .get_json(format!("{}/values/{}!{row}:{row}", self.base_url(), tab))
            .await?;
        Ok(range.values.into_iter().next().unwrap_or_default())
    }

    async fn append_row(&self, tab: &str, row: &[String]) -> Result<(), ServiceError> {
        let url = format!("{}/values/{}:append?valueInputOption=RAW", self.base_url(), tab);
        self.send_json(self.http.post(url), &json!({ "values": [row] })).await
    }

    async fn write_cell(&self, tab: &str, row: usize, col: usize, value: &str) -> Result<(), ServiceError> {
        let url = format!(
            "{}/values/{}!{}{row}?valueInputOption=RAW",
            self.base_url(),
            tab,
            col_letter(col)
        );
        self.send_json(self.http.put(url), &json!({ "values": [[value]] })).await
    }

    async fn delete_row(&self, tab: &str, row: usize) -> Result<(), ServiceError> {
        let sheet_id = self.sheet_id(tab).await?;
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row - 1,
                        "endIndex": row
                    }
                }
            }]
        });
        self.send_json(self.http.post(format!("{}:batchUpdate", self.base_url())), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_letters() {
        assert_eq!(col_letter(1), "A");
        assert_eq!(col_letter(7), "G");
        assert_eq!(col_letter(26), "Z");
        assert_eq!(col_letter(27), "AA");
        assert_eq!(col_letter(52), "AZ");
    }

    #[test]
    fn value_range_tolerates_missing_values() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Inventory!A1:G1"}"#).unwrap();
        assert!(range.values.is_empty());
    }
}
