use assert_cmd::Command;
use predicates::prelude::*;

fn me_api() -> Command {
    let mut cmd = Command::cargo_bin("me-api").unwrap();
    cmd.env_remove("ME_API_BASE_URL")
        .env_remove("VITE_API_BASE_URL")
        .env_remove("ME_API_VERSION")
        .env_remove("ME_API_TIMEOUT_SECS")
        .env_remove("ME_API_MAX_RETRIES")
        .env_remove("ME_API_MAX_RETRY_AFTER_SECS")
        .env_remove("ME_API_SEARCH_LIMIT")
        .env_remove("ME_API_ORIGIN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_operations() {
    me_api()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn missing_base_url_is_configuration_error() {
    me_api()
        .arg("profile")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ME_API_BASE_URL"));
}

#[test]
fn relative_base_url_is_rejected() {
    me_api()
        .args(["--base-url", "/api", "profile"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn config_prints_resolved_prefix() {
    me_api()
        .args(["--base-url", "https://api.example.com/", "--api-version", "v1", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.example.com/api/v1"));
}

#[test]
fn config_as_json() {
    me_api()
        .args(["--base-url", "https://api.example.com", "--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"search_limit\": 50"));
}

#[test]
fn tuning_variables_apply_alongside_base_url_from_env() {
    me_api()
        .env("ME_API_BASE_URL", "https://api.example.com")
        .env("ME_API_MAX_RETRIES", "5")
        .env("ME_API_SEARCH_LIMIT", "7")
        .env("ME_API_ORIGIN", "http://localhost:3000")
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_retries\": 5"))
        .stdout(predicate::str::contains("\"search_limit\": 7"))
        .stdout(predicate::str::contains("http://localhost:3000"));
}

#[test]
fn tuning_variables_apply_alongside_base_url_flag() {
    me_api()
        .env("ME_API_MAX_RETRY_AFTER_SECS", "3")
        .args(["--base-url", "https://api.example.com", "--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_retry_after\": 3"));
}

#[test]
fn unreachable_api_exits_with_network_code() {
    me_api()
        .args(["--base-url", "http://127.0.0.1:1", "profile"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not reach the API"));
}

#[test]
fn unhealthy_api_fails_health_command() {
    me_api()
        .args(["--base-url", "http://127.0.0.1:1", "--format", "json", "health"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"status\": \"error\""));
}

#[test]
fn blank_search_is_rejected_by_argument_parser() {
    me_api().arg("search").assert().failure();
}
