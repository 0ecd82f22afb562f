//! GitHub implementation of [`IssueTracker`].
//!
//! Issues and milestones go through the REST API. Project boards (projects v2)
//! only exist in the GraphQL API, so board lookups and item additions use it.

use super::{CreatedIssue, IssueTracker, ProjectRef, RateBudget, RepositoryRef, TrackerError};
use crate::issues::IssueDescriptor;
use crate::rate_limit::{check_core_rate_limit, check_search_rate_limit, RateLimitInfo};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, Instrument};

/// Milestones per page when listing a repository's milestones.
const MILESTONES_PER_PAGE: u8 = 100;

/// Search results per page for title lookups.
const SEARCH_PER_PAGE: u8 = 100;

const PROJECT_ID_QUERY: &str = r"
query($login: String!, $number: Int!) {
  repositoryOwner(login: $login) {
    ... on ProjectV2Owner {
      projectV2(number: $number) { id }
    }
  }
}";

const ADD_PROJECT_ITEM_MUTATION: &str = r"
mutation($project: ID!, $content: ID!) {
  addProjectV2ItemById(input: { projectId: $project, contentId: $content }) {
    item { id }
  }
}";

#[derive(Debug, Deserialize)]
struct MilestoneEntry {
    number: u64,
    title: String,
}

#[derive(Debug, Serialize)]
struct MilestoneQuery {
    state: &'static str,
    per_page: u8,
    page: u32,
}

/// Issue tracker backed by the GitHub API.
///
/// Milestone titles and project node IDs are fetched on first use and cached
/// for the lifetime of the tracker.
pub struct GitHubTracker {
    octocrab: Octocrab,
    milestones: Mutex<HashMap<RepositoryRef, HashMap<String, u64>>>,
    project_ids: Mutex<HashMap<ProjectRef, String>>,
}

impl GitHubTracker {
    /// Wraps an authenticated GitHub client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self {
            octocrab,
            milestones: Mutex::new(HashMap::new()),
            project_ids: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a milestone title to its number.
    async fn milestone_number(
        &self,
        repository: &RepositoryRef,
        title: &str,
    ) -> Result<u64, TrackerError> {
        let mut cache = self.milestones.lock().await;
        if !cache.contains_key(repository) {
            let milestones = self.fetch_milestones(repository).await?;
            cache.insert(repository.clone(), milestones);
        }

        cache
            .get(repository)
            .and_then(|milestones| milestones.get(title))
            .copied()
            .ok_or_else(|| TrackerError::UnknownMilestone {
                title: title.to_string(),
            })
    }

    /// Lists open and closed milestones of a repository.
    async fn fetch_milestones(
        &self,
        repository: &RepositoryRef,
    ) -> Result<HashMap<String, u64>, TrackerError> {
        debug!(repo = %repository, "Fetching milestones");
        let route = format!("/repos/{}/{}/milestones", repository.owner, repository.name);

        let mut milestones = HashMap::new();
        let mut page = 1;
        loop {
            let query = MilestoneQuery {
                state: "all",
                per_page: MILESTONES_PER_PAGE,
                page,
            };
            let batch: Vec<MilestoneEntry> = self.octocrab.get(&route, Some(&query)).await?;
            let last_page = batch.len() < usize::from(MILESTONES_PER_PAGE);

            milestones.extend(batch.into_iter().map(|m| (m.title, m.number)));

            if last_page {
                break;
            }
            page += 1;
        }

        debug!(repo = %repository, count = milestones.len(), "Fetched milestones");
        Ok(milestones)
    }

    /// Resolves a project board to its GraphQL node ID.
    async fn project_id(&self, project: &ProjectRef) -> Result<String, TrackerError> {
        let mut cache = self.project_ids.lock().await;
        if let Some(id) = cache.get(project) {
            return Ok(id.clone());
        }

        let response: Value = self
            .octocrab
            .graphql(&json!({
                "query": PROJECT_ID_QUERY,
                "variables": { "login": project.owner, "number": project.number },
            }))
            .await?;

        let id = project_id_from_response(&response, project)?;
        debug!(project = %project, project_id = %id, "Resolved project");
        cache.insert(project.clone(), id.clone());
        Ok(id)
    }
}

impl IssueTracker for GitHubTracker {
    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        descriptor: &IssueDescriptor,
    ) -> Result<CreatedIssue, TrackerError> {
        let span = info_span!("create_issue", repo = %repository, title = %descriptor.title);

        async {
            let milestone = self
                .milestone_number(repository, &descriptor.milestone)
                .await?;

            let issue = self
                .octocrab
                .issues(&repository.owner, &repository.name)
                .create(&descriptor.title)
                .body(&descriptor.body)
                .labels(descriptor.labels.clone())
                .milestone(milestone)
                .send()
                .await?;

            info!(issue_number = issue.number, "Issue created");
            Ok(CreatedIssue {
                number: issue.number,
                url: issue.html_url.to_string(),
                node_id: issue.node_id,
            })
        }
        .instrument(span)
        .await
    }

    async fn attach_to_project(
        &self,
        issue: &CreatedIssue,
        project: &ProjectRef,
    ) -> Result<(), TrackerError> {
        let span = info_span!(
            "attach_to_project",
            project = %project,
            issue_number = issue.number
        );

        async {
            let project_id = self.project_id(project).await?;

            let response: Value = self
                .octocrab
                .graphql(&json!({
                    "query": ADD_PROJECT_ITEM_MUTATION,
                    "variables": { "project": project_id, "content": issue.node_id },
                }))
                .await?;

            if let Some(message) = graphql_error_message(&response) {
                return Err(TrackerError::GraphQl { message });
            }
            if response
                .pointer("/data/addProjectV2ItemById/item/id")
                .and_then(Value::as_str)
                .is_none()
            {
                return Err(TrackerError::GraphQl {
                    message: "no project item returned".to_string(),
                });
            }

            info!("Issue added to project");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn find_existing_issue(
        &self,
        repository: &RepositoryRef,
        title: &str,
    ) -> Result<Option<u64>, TrackerError> {
        debug!(title = %title, "Checking for existing issue");

        let query = title_search_query(repository, title);
        let results = self
            .octocrab
            .search()
            .issues_and_pull_requests(&query)
            .per_page(SEARCH_PER_PAGE)
            .send()
            .await?;

        // Search matches words, not whole titles. Only the first page is
        // checked, so a title shared by more open issues than fit on it can
        // be missed.
        Ok(results
            .items
            .iter()
            .find(|issue| issue.title == title)
            .map(|issue| issue.number))
    }

    async fn rate_limit(
        &self,
        budget: RateBudget,
    ) -> Result<Option<RateLimitInfo>, TrackerError> {
        let info = match budget {
            RateBudget::Core => check_core_rate_limit(&self.octocrab).await?,
            RateBudget::Search => check_search_rate_limit(&self.octocrab).await?,
        };
        Ok(Some(info))
    }
}

/// Builds a phrase search for `title`. Quotes would end the phrase early,
/// so they are replaced with spaces.
fn title_search_query(repository: &RepositoryRef, title: &str) -> String {
    let phrase = title.replace('"', " ");
    format!("repo:{repository} is:issue is:open in:title \"{}\"", phrase.trim())
}

/// Joins the messages of a GraphQL `errors` array, if any.
fn graphql_error_message(response: &Value) -> Option<String> {
    let errors = response.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    let message = errors
        .iter()
        .map(|error| {
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
        })
        .collect::<Vec<_>>()
        .join("; ");
    Some(message)
}

fn project_id_from_response(
    response: &Value,
    project: &ProjectRef,
) -> Result<String, TrackerError> {
    if let Some(message) = graphql_error_message(response) {
        return Err(TrackerError::GraphQl { message });
    }

    response
        .pointer("/data/repositoryOwner/projectV2/id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TrackerError::ProjectNotFound {
            owner: project.owner.clone(),
            number: project.number,
        })
}
