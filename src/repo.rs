use crate::error::{Error, Result};
use std::path::Path;

const RAW_HOST: &str = "https://raw.githubusercontent.com";

/// A GitHub repository and branch that serves image files over raw.githubusercontent.com
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoRef {
    pub fn new(owner: &str, name: &str, branch: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: branch.to_string(),
        }
    }

    /// Parse an `owner/repo` identifier
    pub fn parse(slug: &str, branch: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name, branch))
            }
            _ => Err(Error::InvalidRepo(slug.to_string())),
        }
    }

    /// `https://raw.githubusercontent.com/<owner>/<repo>/<branch>`
    pub fn base_url(&self) -> String {
        format!("{}/{}/{}/{}", RAW_HOST, self.owner, self.name, self.branch)
    }

    /// Public URL of `filename` stored under `prefix` in the repository
    pub fn raw_url(&self, prefix: &str, filename: &str) -> String {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", self.base_url(), filename)
        } else {
            format!("{}/{}/{}", self.base_url(), prefix, filename)
        }
    }
}

/// Render a local relative path as a repository path prefix (always `/`-separated)
pub fn path_prefix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
