use serde::{Deserialize, Serialize};
use serde_json::Value;

// GraphQL wire structures
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// `data` of the repository query: one selection per possible owner kind.
#[derive(Debug, Default, Deserialize)]
pub struct RepoQueryData {
    #[serde(default)]
    pub user: Option<OwnerNode>,
    #[serde(default)]
    pub organization: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerNode {
    #[serde(default)]
    pub repository: Option<RawRepository>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name: String,
    pub name_with_owner: String,
    pub is_private: bool,
    pub is_archived: bool,
    pub is_template: bool,
    pub stargazers: Stargazers,
    pub description: Option<String>,
    pub primary_language: Option<RawLanguage>,
    pub fork_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stargazers {
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguage {
    pub color: Option<String>,
    pub id: String,
    pub name: String,
}

/// `data` of the aggregate repository count query.
#[derive(Debug, Deserialize)]
pub struct RepoCountData {
    #[serde(default)]
    pub user: Option<RepoCountOwner>,
}

#[derive(Debug, Deserialize)]
pub struct RepoCountOwner {
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    pub total_count: u64,
}
