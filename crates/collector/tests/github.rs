use gitfolio_collector::github::GithubCollector;
use gitfolio_collector::{CollectorConfig, CollectorError, ProfileSource};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collector(server: &MockServer, token: Option<&str>) -> GithubCollector {
    let config = CollectorConfig {
        github_token: token.map(str::to_string),
        api_base_url: server.uri(),
        user_agent: "gitfolio-tests".to_string(),
        page_size: 30,
        max_concurrency: 2,
    };
    GithubCollector::new(config).unwrap()
}

fn repo_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "full_name": format!("octocat/{}", name),
        "owner": { "login": "octocat" },
        "description": "A test repository",
        "html_url": format!("https://github.com/octocat/{}", name),
        "stargazers_count": 12,
        "forks_count": 3,
        "open_issues_count": 1,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z",
        "language": "Rust",
        "size": 420,
        "has_issues": true,
        "has_projects": false,
        "has_wiki": true
    })
}

#[tokio::test]
async fn fetches_user_profile_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "followers": 100,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z",
            "updated_at": "2024-01-22T12:00:00Z",
            "avatar_url": "https://avatars.example/octocat",
            "html_url": "https://github.com/octocat"
        })))
        .mount(&server)
        .await;

    let user = collector(&server, Some("secret")).user_profile("octocat").await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.display_name(), "The Octocat");
    assert_eq!(user.public_repos, 8);
    assert_eq!(user.recent_activity, 0);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost-user"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = collector(&server, None).user_profile("ghost-user").await.unwrap_err();
    assert!(matches!(err, CollectorError::NotFound(ref u) if u == "ghost-user"));
}

#[tokio::test]
async fn exhausted_rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "0"),
        )
        .mount(&server)
        .await;

    let err = collector(&server, None).user_profile("octocat").await.unwrap_err();
    assert!(matches!(err, CollectorError::RateLimited(0)));
}

#[tokio::test]
async fn lists_repositories_sorted_by_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "updated"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json("hello-world"),
            repo_json("spoon-knife")
        ])))
        .mount(&server)
        .await;

    let repos = collector(&server, None).repositories("octocat").await.unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "hello-world");
    assert_eq!(repos[0].owner_login, "octocat");
    assert_eq!(repos[0].stars, 12);
    assert_eq!(repos[0].size_kb, 420);
    assert!(repos[0].has_wiki);
    assert_eq!(repos[1].full_name, "octocat/spoon-knife");
}

#[tokio::test]
async fn no_content_means_no_repositories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let repos = collector(&server, None).repositories("octocat").await.unwrap();
    assert!(repos.is_empty());
}

#[tokio::test]
async fn decodes_readme_and_defaults_when_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/readme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "IyBIZWxsbwpJbnN0YWxs\nIHdpdGggY2FyZ28K\n",
            "encoding": "base64"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/empty/readme"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let collector = collector(&server, None);

    assert_eq!(
        collector.readme("octocat", "hello-world").await,
        "# Hello\nInstall with cargo\n"
    );
    assert_eq!(collector.readme("octocat", "empty").await, "");
}

#[tokio::test]
async fn per_repository_failures_fall_back_to_empty_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let collector = collector(&server, None);

    assert!(collector.languages("octocat", "broken").await.is_empty());
    assert!(collector.commits("octocat", "broken").await.is_empty());
    assert_eq!(collector.recent_event_count("octocat").await, 0);
}

#[tokio::test]
async fn fetches_languages_commits_and_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Rust": 12000,
            "Shell": 300
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/commits"))
        .and(query_param("per_page", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "sha": "b", "commit": { "committer": { "date": "2024-06-02T00:00:00Z" }, "author": null } },
            { "sha": "a", "commit": { "committer": { "date": "2024-06-01T00:00:00Z" }, "author": null } }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}, {}])))
        .mount(&server)
        .await;

    let collector = collector(&server, None);

    let languages = collector.languages("octocat", "hello-world").await;
    assert_eq!(languages.get("Rust"), Some(&12000));
    assert_eq!(languages.len(), 2);

    let commits = collector.commits("octocat", "hello-world").await;
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].sha, "b");

    assert_eq!(collector.recent_event_count("octocat").await, 3);
    assert_eq!(collector.max_concurrency(), 2);
}
