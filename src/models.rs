use serde::{Deserialize, Serialize};

use crate::error::{BadgeServerError, Result};
use crate::types::{RawLanguage, RawRepository, RepoQueryData};

pub const NOT_FOUND_OR_INACCESSIBLE: &str = "Repository not found or inaccessible";
pub const USER_REPOSITORY_NOT_FOUND: &str = "User Repository Not found";
pub const ORGANIZATION_REPOSITORY_NOT_FOUND: &str = "Organization Repository Not found";
pub const UNEXPECTED_BEHAVIOR: &str = "Unexpected behavior";

/// Owner login and repository name, both required before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub login: String,
    pub name: String,
}

impl RepositoryIdentity {
    /// Validates raw query input. Empty strings count as absent.
    pub fn parse(username: Option<&str>, reponame: Option<&str>) -> Result<Self> {
        let username = username.filter(|value| !value.is_empty());
        let reponame = reponame.filter(|value| !value.is_empty());

        match (username, reponame) {
            (None, None) => Err(BadgeServerError::MissingParam(vec!["username", "repo"])),
            (None, Some(_)) => Err(BadgeServerError::MissingParam(vec!["username"])),
            (Some(_), None) => Err(BadgeServerError::MissingParam(vec!["repo"])),
            (Some(login), Some(name)) => Ok(RepositoryIdentity {
                login: login.to_string(),
                name: name.to_string(),
            }),
        }
    }
}

/// Which kind of account answered the repository query.
///
/// GitHub resolves the login against both `user` and `organization`; exactly
/// one side is populated for a real account. The inner value is that owner's
/// `repository` selection, which is `None` when the name does not exist.
#[derive(Debug)]
pub enum RepositoryOwner {
    User(Option<RawRepository>),
    Organization(Option<RawRepository>),
}

impl TryFrom<RepoQueryData> for RepositoryOwner {
    type Error = BadgeServerError;

    fn try_from(data: RepoQueryData) -> Result<Self> {
        match (data.user, data.organization) {
            (Some(user), None) => Ok(RepositoryOwner::User(user.repository)),
            (None, Some(organization)) => Ok(RepositoryOwner::Organization(organization.repository)),
            (None, None) => Err(BadgeServerError::repository_fetch(NOT_FOUND_OR_INACCESSIBLE)),
            (Some(_), Some(_)) => Err(BadgeServerError::repository_fetch(UNEXPECTED_BEHAVIOR)),
        }
    }
}

impl RepositoryOwner {
    /// Classifies an optional `data` block; a missing block means the login is unknown.
    pub fn from_data(data: Option<RepoQueryData>) -> Result<Self> {
        match data {
            Some(data) => RepositoryOwner::try_from(data),
            None => Err(BadgeServerError::repository_fetch(NOT_FOUND_OR_INACCESSIBLE)),
        }
    }

    pub fn into_repository(self) -> Result<NormalizedRepository> {
        match self {
            RepositoryOwner::User(Some(repository))
            | RepositoryOwner::Organization(Some(repository)) => Ok(repository.into()),
            RepositoryOwner::User(None) => {
                Err(BadgeServerError::repository_fetch(USER_REPOSITORY_NOT_FOUND))
            }
            RepositoryOwner::Organization(None) => {
                Err(BadgeServerError::repository_fetch(ORGANIZATION_REPOSITORY_NOT_FOUND))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryLanguage {
    pub color: Option<String>,
    pub id: String,
    pub name: String,
}

impl From<RawLanguage> for PrimaryLanguage {
    fn from(language: RawLanguage) -> Self {
        PrimaryLanguage {
            color: language.color,
            id: language.id,
            name: language.name,
        }
    }
}

/// Repository metadata flattened out of whichever owner branch answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRepository {
    pub name: String,
    pub name_with_owner: String,
    pub is_private: bool,
    pub is_archived: bool,
    pub is_template: bool,
    pub star_count: u64,
    pub description: Option<String>,
    pub primary_language: Option<PrimaryLanguage>,
    pub fork_count: u64,
}

impl From<RawRepository> for NormalizedRepository {
    fn from(repository: RawRepository) -> Self {
        NormalizedRepository {
            name: repository.name,
            name_with_owner: repository.name_with_owner,
            is_private: repository.is_private,
            is_archived: repository.is_archived,
            is_template: repository.is_template,
            star_count: repository.stargazers.total_count,
            description: repository.description,
            primary_language: repository.primary_language.map(PrimaryLanguage::from),
            fork_count: repository.fork_count,
        }
    }
}
