//! In-memory hosting double shared by the async tests

use std::sync::Mutex;

use liftoff_core::types::{Issue, NewIssue, NewRelease, Release, Tag};
use liftoff_core::{Commit, HostingError, HostingResult, PullRequest, RepoSlug, SourceHosting};

#[derive(Default)]
pub(crate) struct FakeHosting {
    pub pulls: Vec<PullRequest>,
    pub tag: Option<Tag>,
    pub commits: Vec<Commit>,
    pub list_fails: bool,
    pub tag_fails: bool,
    pub compare_fails: bool,
    pub listed: Mutex<Vec<u8>>,
    pub compared: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl SourceHosting for FakeHosting {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_closed_pull_requests(
        &self,
        _repo: &RepoSlug,
        limit: u8,
    ) -> HostingResult<Vec<PullRequest>> {
        self.listed.lock().unwrap().push(limit);
        if self.list_fails {
            return Err(HostingError::Transport("connection reset".to_string()));
        }
        Ok(self.pulls.iter().take(limit as usize).cloned().collect())
    }

    async fn latest_tag(&self, _repo: &RepoSlug) -> HostingResult<Option<Tag>> {
        if self.tag_fails {
            return Err(HostingError::Api {
                status: 500,
                message: "server error".to_string(),
            });
        }
        Ok(self.tag.clone())
    }

    async fn compare_commits(
        &self,
        _repo: &RepoSlug,
        base: &str,
        head: &str,
    ) -> HostingResult<Vec<Commit>> {
        self.compared
            .lock()
            .unwrap()
            .push((base.to_string(), head.to_string()));
        if self.compare_fails {
            return Err(HostingError::NotFound("No common ancestor".to_string()));
        }
        Ok(self.commits.clone())
    }

    async fn create_release(&self, _repo: &RepoSlug, _release: &NewRelease) -> HostingResult<Release> {
        unreachable!("notes composition never creates releases")
    }

    async fn upload_release_asset(
        &self,
        _repo: &RepoSlug,
        _release: &Release,
        _name: &str,
        _data: Vec<u8>,
    ) -> HostingResult<()> {
        unreachable!("notes composition never uploads assets")
    }

    async fn create_issue(&self, _repo: &RepoSlug, _issue: &NewIssue) -> HostingResult<Issue> {
        unreachable!("notes composition never files issues")
    }
}
