//! Community discovery across Hacker News, Reddit, Discord and forums.
//!
//! Four independent batches. One batch failing is logged and the others
//! carry on; only when every batch fails does the search fail.

use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::error::{ResearchError, Result, SearchError, SearchResult};
use crate::pipeline::dedup::dedupe_by_url;
use crate::pipeline::queries::{discord_query, forum_query, hacker_news_queries, reddit_queries};
use crate::pipeline::settle::settle_all;
use crate::traits::searcher::WebSearcher;
use crate::traits::stories::{Story, StorySearcher};
use crate::types::community::{Community, Platform};
use crate::types::config::ResearchConfig;
use crate::types::requests::CommunityRequest;
use crate::types::search::SearchHit;

static REDDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)reddit\.com/r/([A-Za-z0-9_]+)").unwrap());
static DISCORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:discord\.gg/|discord(?:app)?\.com/invite/)[A-Za-z0-9-]+").unwrap()
});
static FORUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)forums?|communit(?:y|ies)|discuss|discourse|/groups?/|slack|/boards?/|/t/|circle\.so")
        .unwrap()
});
static MEMBER_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d[\d,.]*\s*[km]?\+?\s*(?:members|subscribers|readers|users|online)\b").unwrap()
});

const BATCH_COUNT: usize = 4;

type Batch<'a> = BoxFuture<'a, SearchResult<Vec<Community>>>;

pub async fn find_communities(
    searcher: &dyn WebSearcher,
    stories: &dyn StorySearcher,
    config: &ResearchConfig,
    request: &CommunityRequest,
) -> Result<Vec<Community>> {
    request.validate()?;
    let audience = request.target_audience.trim();
    let topics = &request.topics;
    let limit = config.results_per_query;
    let min_points = config.min_story_points;

    info!(audience = %audience, topics = topics.len(), "Finding communities");

    let hn_queries = hacker_news_queries(audience, topics);
    let reddit = reddit_queries(audience, topics);
    let discord = vec![discord_query(audience, topics)];
    let forum = vec![forum_query(audience)];

    let batches: Vec<Batch<'_>> = vec![
        async move {
            let found =
                run_batch(hn_queries, |q| async move { stories.search_stories(&q, limit).await })
                    .await?;
            Ok::<_, SearchError>(
                found
                    .into_iter()
                    .filter(|story| story.points >= min_points)
                    .map(story_community)
                    .collect(),
            )
        }
        .boxed(),
        web_batch(searcher, reddit, limit).boxed(),
        web_batch(searcher, discord, limit).boxed(),
        web_batch(searcher, forum, limit).boxed(),
    ];

    let settled = settle_all(batches).await;
    if settled.all_rejected() {
        let (_, errors) = settled.into_parts();
        return Err(all_failed(errors));
    }

    let mut found = Vec::new();
    for (name, outcome) in ["hacker_news", "reddit", "discord", "forum"]
        .into_iter()
        .zip(settled.into_outcomes())
    {
        match outcome {
            Ok(communities) => {
                debug!(batch = name, found = communities.len(), "Community batch complete");
                found.extend(communities);
            }
            Err(e) => warn!(batch = name, error = %e, "Community batch failed"),
        }
    }

    let mut communities = dedupe_by_url(found, |c| c.url.as_str());
    communities.truncate(config.max_communities);

    info!(audience = %audience, found = communities.len(), "Community search complete");
    Ok(communities)
}

fn all_failed(errors: Vec<SearchError>) -> ResearchError {
    match errors.into_iter().next() {
        Some(SearchError::NotConfigured) => {
            ResearchError::Config("no search provider configured".to_string())
        }
        Some(first) => ResearchError::AllBatchesFailed {
            batches: BATCH_COUNT,
            first_error: first.to_string(),
        },
        None => ResearchError::NoResults("no community batches ran".to_string()),
    }
}

/// Run a batch's queries concurrently. The batch fails only if every query
/// fails.
async fn run_batch<T, F, Fut>(queries: Vec<String>, run: F) -> SearchResult<Vec<T>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = SearchResult<Vec<T>>>,
{
    let settled = settle_all(queries.into_iter().map(run)).await;
    let all_failed = settled.all_rejected();
    let (values, errors) = settled.into_parts();

    match errors.into_iter().next() {
        Some(first) if all_failed => Err(first),
        _ => Ok(values.into_iter().flatten().collect()),
    }
}

async fn web_batch(
    searcher: &dyn WebSearcher,
    queries: Vec<String>,
    limit: usize,
) -> SearchResult<Vec<Community>> {
    let hits = run_batch(queries, |q| async move { searcher.search_with_limit(&q, limit).await })
        .await?;
    Ok(hits.iter().filter_map(community_from_hit).collect())
}

/// Platform by URL pattern; `None` when the URL is not a community.
pub fn classify_platform(url: &str) -> Option<Platform> {
    if REDDIT_RE.is_match(url) {
        Some(Platform::Reddit)
    } else if DISCORD_RE.is_match(url) {
        Some(Platform::Discord)
    } else if url.contains("news.ycombinator.com") {
        Some(Platform::HackerNews)
    } else if FORUM_RE.is_match(url) {
        Some(Platform::Forum)
    } else {
        None
    }
}

fn community_from_hit(hit: &SearchHit) -> Option<Community> {
    let platform = classify_platform(&hit.url)?;

    let community = match platform {
        Platform::Reddit => {
            let subreddit = REDDIT_RE.captures(&hit.url)?.get(1)?.as_str().to_string();
            Community::new(
                Platform::Reddit,
                format!("r/{}", subreddit),
                format!("https://www.reddit.com/r/{}", subreddit),
            )
        }
        _ => Community::new(platform, clean_title(&hit.title, &hit.url), hit.url.clone()),
    };

    let community = community.with_description(hit.snippet.trim());
    Some(match MEMBER_COUNT_RE.find(&hit.snippet) {
        Some(count) => community.with_member_count(count.as_str().trim()),
        None => community,
    })
}

/// The community is the discussion thread; the story's outbound link is
/// not carried.
fn story_community(story: Story) -> Community {
    let engagement = format!("{} points · {} comments", story.points, story.num_comments);
    Community::new(Platform::HackerNews, story.title.clone(), story.discussion_url())
        .with_member_count(engagement)
}

fn clean_title(title: &str, url: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return url.to_string();
    }
    title
        .trim_end_matches(" - Discord")
        .trim_end_matches(" | Discord")
        .trim()
        .to_string()
}
