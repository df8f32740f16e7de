//! Entry points that resolve everything from the process: the repository
//! from the working directory and the token from `GITHUB_TOKEN`.

use anyhow::Result;
use hubgate_core::{current_branch, issue_number_from_branch, owner_and_repo};
use hubgate_gh::GitHubGateway;
use hubgate_test_utils::{EnvVarGuard, GitRepoTestGuard};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_new_uses_working_directory_and_token_from_env() -> Result<()> {
  let server = MockServer::start().await;
  let repo = GitRepoTestGuard::with_github_branch("git@github.com:acme/widgets.git", "42-fix-thing");
  let _env = EnvVarGuard::new()
    .set("GITHUB_TOKEN", "env-token")
    .set("HUBGATE_API_URL", &server.uri())
    .current_dir(repo.path());

  Mock::given(method("GET"))
    .and(path("/user"))
    .and(header("Authorization", "token env-token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
    .expect(1)
    .mount(&server)
    .await;

  let mut gateway = GitHubGateway::new(None)?;
  assert_eq!(gateway.owner(), Some("acme"));
  assert_eq!(gateway.repo(), Some("widgets"));

  let user = gateway.get_user().await?;
  assert_eq!(user["login"], "octocat");
  Ok(())
}

#[tokio::test]
async fn test_new_prefers_explicit_token() -> Result<()> {
  let server = MockServer::start().await;
  let repo = GitRepoTestGuard::with_github_branch("https://github.com/acme/widgets.git", "main");
  let _env = EnvVarGuard::new()
    .set("GITHUB_TOKEN", "env-token")
    .set("HUBGATE_API_URL", &server.uri())
    .current_dir(repo.path());

  Mock::given(method("GET"))
    .and(path("/user"))
    .and(header("Authorization", "token flag-token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "hubot"})))
    .expect(1)
    .mount(&server)
    .await;

  let mut gateway = GitHubGateway::new(Some("flag-token".to_string()))?;
  let user = gateway.get_user().await?;
  assert_eq!(user["login"], "hubot");
  Ok(())
}

#[test]
fn test_repository_functions_follow_working_directory() -> Result<()> {
  let repo = GitRepoTestGuard::with_github_branch("git@github.com:acme/widgets.git", "42-fix-thing");
  let nested = repo.path().join("src");
  std::fs::create_dir_all(&nested)?;
  let _env = EnvVarGuard::new().current_dir(&nested);

  let github = owner_and_repo()?.expect("GitHub remote should resolve");
  assert_eq!(github.owner, "acme");
  assert_eq!(github.repo, "widgets");
  assert_eq!(current_branch()?, "42-fix-thing");
  assert_eq!(issue_number_from_branch()?, Some(42));
  Ok(())
}

#[test]
fn test_repository_functions_outside_repository_fail() {
  let temp_dir = hubgate_test_utils::TempDir::new().unwrap();
  let _env = EnvVarGuard::new().current_dir(temp_dir.path());

  assert!(owner_and_repo().is_err());
  assert!(current_branch().is_err());
  assert!(GitHubGateway::new(None).is_err());
}
