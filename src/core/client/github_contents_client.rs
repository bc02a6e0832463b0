use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::app_config::GithubConfig;
use crate::core::persistence::dataset::dataset_codec::{decode_content, encode_content};
use crate::core::persistence::dataset::remote_dataset_repository_trait::SaveOutcome;

/// One file as held in the repository, with its revision token.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDocument {
    pub path: String,
    pub content: Vec<u8>,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentFetch {
    Found(RemoteDocument),
    NotFound,
    Failed { status: Option<u16>, body: String },
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

enum EntryFetch {
    Found(ContentsResponse),
    NotFound,
    Failed { status: Option<u16>, body: String },
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    #[serde(default)]
    commit: Option<CommitRef>,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

/// Client for the repository contents API (read and full-replace of single files).
pub struct GithubContentsClient {
    client: Client,
    config: GithubConfig,
}

impl GithubContentsClient {
    pub fn new(client: Client, config: GithubConfig) -> Self {
        Self { client, config }
    }

    pub fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            encoded.join("/"),
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Metadata and inline content of `path` on the configured branch.
    async fn fetch_entry(&self, path: &str) -> EntryFetch {
        let url = self.contents_url(path);
        let req = self
            .authorized(self.client.get(&url))
            .query(&[("ref", self.config.branch.as_str())]);

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                return EntryFetch::Failed {
                    status: None,
                    body: e.to_string(),
                }
            }
        };

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return EntryFetch::NotFound;
        }
        if !status.is_success() {
            return EntryFetch::Failed {
                status: Some(status.as_u16()),
                body: resp.text().await.unwrap_or_default(),
            };
        }

        match resp.json().await {
            Ok(entry) => EntryFetch::Found(entry),
            Err(e) => EntryFetch::Failed {
                status: Some(status.as_u16()),
                body: format!("invalid contents response: {e}"),
            },
        }
    }

    /// Reads the file at `path` on the configured branch.
    pub async fn get_document(&self, path: &str) -> DocumentFetch {
        let entry = match self.fetch_entry(path).await {
            EntryFetch::Found(entry) => entry,
            EntryFetch::NotFound => return DocumentFetch::NotFound,
            EntryFetch::Failed { status, body } => return DocumentFetch::Failed { status, body },
        };

        // Files over 1 MB come back without inline content.
        let content = if entry.content.is_empty() && entry.encoding.as_deref() == Some("none") {
            let Some(download_url) = entry.download_url.as_deref() else {
                return DocumentFetch::Failed {
                    status: None,
                    body: "no inline content and no download_url".into(),
                };
            };
            match self.download_raw(download_url).await {
                Ok(bytes) => bytes,
                Err(body) => return DocumentFetch::Failed { status: None, body },
            }
        } else {
            match decode_content(&entry.content) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return DocumentFetch::Failed {
                        status: None,
                        body: e.to_string(),
                    }
                }
            }
        };

        debug!(path, sha = %entry.sha, bytes = content.len(), "Fetched remote document");
        DocumentFetch::Found(RemoteDocument {
            path: path.to_string(),
            content,
            sha: entry.sha,
        })
    }

    async fn download_raw(&self, url: &str) -> Result<Vec<u8>, String> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("raw download returned {status}"));
        }
        resp.bytes().await.map(|b| b.to_vec()).map_err(|e| e.to_string())
    }

    /// Current revision token of `path`; `Ok(None)` when the file does not exist.
    /// Only the metadata is read, the content is neither decoded nor downloaded.
    pub async fn current_sha(&self, path: &str) -> Result<Option<String>, SaveOutcome> {
        match self.fetch_entry(path).await {
            EntryFetch::Found(entry) => Ok(Some(entry.sha)),
            EntryFetch::NotFound => Ok(None),
            EntryFetch::Failed { status, body } => Err(SaveOutcome::Failed { status, body }),
        }
    }

    /// Writes `content` as the full new version of `path`.
    ///
    /// The current sha is read first so the write is an update when the file exists
    /// and a create otherwise. A stale sha surfaces as `SaveOutcome::Conflict`.
    pub async fn replace_document(&self, path: &str, content: &[u8], message: &str) -> SaveOutcome {
        let sha = match self.current_sha(path).await {
            Ok(sha) => sha,
            Err(outcome) => return outcome,
        };

        self.put_document(path, content, message, sha.as_deref()).await
    }

    pub async fn put_document(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> SaveOutcome {
        let body = PutContentsRequest {
            message,
            content: encode_content(content),
            branch: &self.config.branch,
            sha,
        };

        let resp = match self
            .authorized(self.client.put(self.contents_url(path)))
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return SaveOutcome::Failed {
                    status: None,
                    body: e.to_string(),
                }
            }
        };

        let status = resp.status();
        if status.is_success() {
            let commit = resp
                .json::<PutContentsResponse>()
                .await
                .ok()
                .and_then(|r| r.commit)
                .map(|c| c.sha);
            debug!(path, ?commit, "Committed remote document");

            return if status == StatusCode::CREATED {
                SaveOutcome::Created
            } else {
                SaveOutcome::Updated
            };
        }

        let text = resp.text().await.unwrap_or_default();
        match status {
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => SaveOutcome::Conflict {
                status: status.as_u16(),
                body: text,
            },
            _ => SaveOutcome::Failed {
                status: Some(status.as_u16()),
                body: text,
            },
        }
    }
}
