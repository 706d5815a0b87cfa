//! HTTP client for the generation backend.
//!
//! Thin wrappers over the REST endpoints the workflow consumes. Every
//! call attaches the bearer credential when one is set; a `401` maps to
//! [`Error::Unauthorized`] before any body handling so the caller can
//! run the forced sign-out transition. Other non-success statuses keep
//! the raw body for the notice surface.

use std::collections::BTreeMap;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use casegen_core::prelude::*;
use casegen_core::{GenerationDetail, GenerationSummaryEntry, RequirementInfo, Testcase};

use crate::protocol::{
    GenerateRequest, JiraCreated, JiraRequest, RegenerateOutcome, RegenerateRequest,
    RegenerateTestcaseRequest, UploadRequirementResponse, UploadStandardResponse,
};

/// Characters escaped in path segments, matching `encodeURIComponent`:
/// everything non-alphanumeric except `- _ . ! ~ * ' ( )`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path segment (generation-set ids, requirement ids
/// and testcase ids are backend-supplied strings).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Client for the testcase-generation backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    credential: Option<String>,
}

impl ApiClient {
    /// Create a client against a base URL such as `http://localhost:5000`.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::config(format!("invalid API base URL '{base}': {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            credential: None,
        })
    }

    /// Attach the bearer credential used for all subsequent calls.
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // Concatenate rather than Url::join so a base with a path prefix
    // (e.g. http://host/api) keeps it.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&raw)
            .map_err(|e| Error::config(format!("invalid endpoint path '{path}': {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.credential {
            Some(credential) => builder.bearer_auth(credential),
            None => builder,
        }
    }

    /// Map the response envelope: 401 first, then other error statuses
    /// with the body preserved, then JSON decode.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(Error::Unauthorized);
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::api(status.as_u16(), body));
        }
        serde_json::from_str(&body).map_err(Error::from)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {url}");
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_json(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("{method} {url}");
        let response = self
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_json(response).await
    }

    // ─────────────────────────────────────────────────────────────
    // Document listings
    // ─────────────────────────────────────────────────────────────

    /// `GET /standards` — mapping of display name to storage URI.
    pub async fn fetch_standards(&self) -> Result<BTreeMap<String, String>> {
        self.get_json("/standards").await
    }

    /// `GET /requirements` — mapping of requirement id to title/URI.
    pub async fn fetch_requirements(&self) -> Result<BTreeMap<String, RequirementInfo>> {
        self.get_json("/requirements").await
    }

    // ─────────────────────────────────────────────────────────────
    // Generation sets
    // ─────────────────────────────────────────────────────────────

    /// `GET /generated` — the authoritative summary. Always re-fetched
    /// after a mutating action; never patched together locally.
    pub async fn fetch_summary(&self) -> Result<Vec<GenerationSummaryEntry>> {
        self.get_json("/generated").await
    }

    /// `GET /generated/requirement/{genId}` — the detail view for one
    /// generation set.
    pub async fn fetch_detail(&self, gen_id: &str) -> Result<GenerationDetail> {
        let path = format!("/generated/requirement/{}", encode_segment(gen_id));
        self.get_json(&path).await
    }

    /// `POST /testcases` — request generation. The response shape is
    /// deliberately not trusted (freshly generated entries diverge from
    /// previously generated ones); callers re-fetch the summary instead.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<serde_json::Value> {
        self.send_json(Method::POST, "/testcases", request).await
    }

    /// `POST /requirements/{reqId}/regenerate` — regenerate the whole
    /// set for one requirement.
    pub async fn regenerate_requirement(
        &self,
        req_id: &str,
        request: &RegenerateRequest,
    ) -> Result<RegenerateOutcome> {
        let path = format!("/requirements/{}/regenerate", encode_segment(req_id));
        self.send_json(Method::POST, &path, request).await
    }

    /// `POST /testcases/{genId}/regenerate/{tcId}` — regenerate one
    /// testcase inside a set.
    pub async fn regenerate_testcase(
        &self,
        gen_id: &str,
        tc_id: &str,
        request: &RegenerateTestcaseRequest,
    ) -> Result<serde_json::Value> {
        let path = format!(
            "/testcases/{}/regenerate/{}",
            encode_segment(gen_id),
            encode_segment(tc_id)
        );
        self.send_json(Method::POST, &path, request).await
    }

    /// `PATCH /testcases/{genId}/{tcId}` — commit a full edited testcase.
    pub async fn save_testcase(
        &self,
        gen_id: &str,
        testcase: &Testcase,
    ) -> Result<serde_json::Value> {
        let path = format!(
            "/testcases/{}/{}",
            encode_segment(gen_id),
            encode_segment(&testcase.tc_id)
        );
        self.send_json(Method::PATCH, &path, testcase).await
    }

    /// `POST /testcases/{genId}/{tcId}/jira` — file the testcase as an
    /// issue-tracker ticket.
    pub async fn create_jira(
        &self,
        gen_id: &str,
        tc_id: &str,
        request: &JiraRequest,
    ) -> Result<JiraCreated> {
        let path = format!(
            "/testcases/{}/{}/jira",
            encode_segment(gen_id),
            encode_segment(tc_id)
        );
        self.send_json(Method::POST, &path, request).await
    }

    // ─────────────────────────────────────────────────────────────
    // Uploads
    // ─────────────────────────────────────────────────────────────

    /// `POST /upload` — multipart upload of a standard document under
    /// the `standardFile` field.
    pub async fn upload_standard(&self, file: &Path) -> Result<UploadStandardResponse> {
        self.upload_multipart("/upload", "standardFile", file).await
    }

    /// `POST /requirements/upload` — multipart upload of a requirement
    /// document under the `requirementFile` field.
    pub async fn upload_requirement(&self, file: &Path) -> Result<UploadRequirementResponse> {
        self.upload_multipart("/requirements/upload", "requirementFile", file)
            .await
    }

    async fn upload_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
        file: &Path,
    ) -> Result<T> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let form = Form::new().part(field, Part::bytes(bytes).file_name(file_name));

        let url = self.endpoint(path)?;
        debug!("POST {url} (multipart {field})");
        let response = self
            .request(Method::POST, url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment_matches_encode_uri_component() {
        assert_eq!(encode_segment("REQ-7"), "REQ-7");
        assert_eq!(encode_segment("gen 1/2"), "gen%201%2F2");
        assert_eq!(encode_segment("a&b?c"), "a%26b%3Fc");
        // encodeURIComponent leaves these unescaped
        assert_eq!(encode_segment("x!~*'()"), "x!~*'()");
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_endpoint_joins_against_base() {
        let client = ApiClient::new("http://localhost:5000").unwrap();
        let url = client.endpoint("/standards").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/standards");
    }

    #[test]
    fn test_detail_path_encodes_gen_id() {
        let path = format!("/generated/requirement/{}", encode_segment("gen id#1"));
        assert_eq!(path, "/generated/requirement/gen%20id%231");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        let url = client.endpoint("/standards").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/standards");
    }

    #[test]
    fn test_upload_missing_file_is_io_error() {
        let client = ApiClient::new("http://localhost:5000").unwrap();
        let result =
            tokio_test::block_on(client.upload_standard(Path::new("/nonexistent/upload.pdf")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
