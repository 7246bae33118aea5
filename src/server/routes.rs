//! Studio API routes.
//!
//! Every API route answers JSON. Domain failures (a bad project path, a
//! failed deploy) are reported as `{"success": false, "error": ...}` with
//! status 200; protocol problems get 400, 403, 404, 405 or 415.
//!
//! API calls must come from the studio page itself: a cross-site `Origin` is
//! refused with 403 and POST bodies must be sent as `application/json`, so a
//! page on another site cannot drive the API with a plain form or
//! `text/plain` post.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::{Assistant, Provider};
use crate::analysis::{find_by_name, resolve_project_dir, ProjectAnalyzer};
use crate::config::Settings;
use crate::error::{DeployError, Result};
use crate::generate::{generate_files, GenerateOptions};
use crate::netlify::{DeployKind, NetlifyCli};

use super::http::{HttpRequest, HttpResponse};

/// The single-page studio.
pub const INDEX_HTML: &str = include_str!("index.html");

/// Shared state handed to every connection.
pub struct StudioState {
    pub settings: Settings,
    pub netlify: NetlifyCli,
    pub assistant: Assistant,
}

fn default_path() -> String {
    ".".to_string()
}

#[derive(Debug, Deserialize)]
struct PathBody {
    #[serde(default = "default_path")]
    path: String,
}

#[derive(Debug, Deserialize)]
struct ReadFileBody {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    config: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct InitSiteBody {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    site_name: Option<String>,
    #[serde(default)]
    account_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateDomainBody {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    new_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeployBody {
    #[serde(default = "default_path")]
    path: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunCommandBody {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    command: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    context: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TestConnectionBody {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

/// Routes and their allowed method.
const ROUTES: &[(&str, &str)] = &[
    ("/", "GET"),
    ("/api/analyze", "POST"),
    ("/api/read-file", "POST"),
    ("/api/generate", "POST"),
    ("/api/list-teams", "GET"),
    ("/api/list-sites", "GET"),
    ("/api/check-cli", "GET"),
    ("/api/login", "POST"),
    ("/api/init-site", "POST"),
    ("/api/update-domain", "POST"),
    ("/api/deploy", "POST"),
    ("/api/run-command", "POST"),
    ("/api/chat", "POST"),
    ("/api/test-connection", "POST"),
];

fn parse_body<T: DeserializeOwned>(req: &HttpRequest) -> Result<T> {
    let body: &[u8] = if req.body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &req.body
    };
    serde_json::from_slice(body).map_err(|e| DeployError::BadRequest {
        message: format!("Invalid JSON body: {}", e),
    })
}

fn failure(err: &DeployError) -> HttpResponse {
    HttpResponse::json(200, &json!({"success": false, "error": err.to_string()}))
}

fn ok(value: Value) -> HttpResponse {
    HttpResponse::json(200, &value)
}

/// `Origin`, when sent, must name the host the request was addressed to.
fn same_origin(req: &HttpRequest) -> bool {
    let Some(origin) = req.header("Origin") else {
        return true;
    };
    match req.header("Host") {
        Some(host) => origin.eq_ignore_ascii_case(&format!("http://{}", host.trim())),
        None => false,
    }
}

/// Media type of the body, without parameters such as `charset`.
fn is_json_body(req: &HttpRequest) -> bool {
    req.header("Content-Type")
        .and_then(|value| value.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

/// Refuse cross-site callers and non-JSON posts before any handler runs.
fn reject_foreign(req: &HttpRequest) -> Option<HttpResponse> {
    if !same_origin(req) {
        tracing::warn!(
            origin = req.header("Origin").unwrap_or_default(),
            path = %req.path,
            "refused cross-origin request"
        );
        return Some(HttpResponse::error(403, "Cross-origin requests are not allowed"));
    }
    if req.method == "POST" && !is_json_body(req) {
        return Some(HttpResponse::error(
            415,
            "Request body must be sent as application/json",
        ));
    }
    None
}

/// Route one request.
pub fn handle(state: &StudioState, req: &HttpRequest) -> HttpResponse {
    let Some(&(_, allowed)) = ROUTES.iter().find(|(path, _)| *path == req.path) else {
        return HttpResponse::error(404, &format!("Not found: {}", req.path));
    };
    if req.method != allowed {
        return HttpResponse::error(405, &format!("Method {} not allowed", req.method));
    }
    if let Some(refused) = reject_foreign(req) {
        return refused;
    }

    tracing::debug!("{} {}", req.method, req.path);
    let result = match req.path.as_str() {
        "/" => return HttpResponse::html(INDEX_HTML),
        "/api/analyze" => parse_body(req).map(|b| analyze(&b)),
        "/api/read-file" => parse_body(req).map(|b| read_file(&b)),
        "/api/generate" => parse_body(req).map(|b| generate(state, b)),
        "/api/list-teams" => Ok(list_teams(state)),
        "/api/list-sites" => Ok(list_sites(state)),
        "/api/check-cli" => Ok(check_cli(state)),
        "/api/login" => parse_body(req).map(|b| login(state, &b)),
        "/api/init-site" => parse_body(req).map(|b| init_site(state, &b)),
        "/api/update-domain" => parse_body(req).map(|b| update_domain(state, &b)),
        "/api/deploy" => parse_body(req).map(|b| deploy(state, &b)),
        "/api/run-command" => parse_body(req).map(|b| run_command(state, &b)),
        "/api/chat" => parse_body(req).map(|b| chat(state, &b)),
        "/api/test-connection" => parse_body(req).map(|b| test_connection(state, &b)),
        _ => return HttpResponse::error(404, &format!("Not found: {}", req.path)),
    };

    result.unwrap_or_else(|e| {
        tracing::debug!("Rejected {}: {}", req.path, e);
        HttpResponse::error(400, &e.to_string())
    })
}

fn cli_for(state: &StudioState, path: &str) -> Result<NetlifyCli> {
    let dir = resolve_project_dir(Path::new(path))?;
    Ok(state.netlify.in_dir(&dir))
}

fn analyze(body: &PathBody) -> HttpResponse {
    let mut analyzer = match ProjectAnalyzer::new(Path::new(&body.path)) {
        Ok(analyzer) => analyzer,
        Err(e) => return failure(&e),
    };
    let analysis = analyzer.analyze();
    ok(json!({
        "success": true,
        "analysis": analysis,
        "file_tree": analyzer.files(),
    }))
}

/// Locate `filename` inside `root`: the direct path first, then the first
/// scanned file with that name. Paths escaping `root` are refused.
pub fn locate_file(root: &Path, filename: &str) -> Option<PathBuf> {
    let direct = root.join(filename);
    let candidate = if direct.is_file() {
        direct
    } else {
        let name = Path::new(filename).file_name()?.to_str()?;
        find_by_name(root, name)?
    };
    let resolved = candidate.canonicalize().ok()?;
    resolved.starts_with(root).then_some(resolved)
}

fn read_file(body: &ReadFileBody) -> HttpResponse {
    let (Some(path), Some(filename)) = (
        body.path.as_deref().filter(|p| !p.is_empty()),
        body.filename.as_deref().filter(|f| !f.is_empty()),
    ) else {
        return ok(json!({"success": false, "error": "Missing path or filename"}));
    };

    let root = match resolve_project_dir(Path::new(path)) {
        Ok(root) => root,
        Err(e) => return failure(&e),
    };
    let Some(file) = locate_file(&root, filename) else {
        return ok(json!({"success": false, "error": format!("File not found: {}", filename)}));
    };

    match fs::read(&file) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => ok(json!({"success": true, "content": content})),
            Err(_) => ok(json!({"success": false, "error": "Cannot read binary file"})),
        },
        Err(e) => failure(&e.into()),
    }
}

fn generate(state: &StudioState, mut body: GenerateBody) -> HttpResponse {
    let root = match resolve_project_dir(Path::new(&body.path)) {
        Ok(root) => root,
        Err(e) => return failure(&e),
    };
    body.config
        .python_version
        .get_or_insert_with(|| state.settings.build.python_version.clone());

    match generate_files(&root, &body.config, true) {
        Ok(results) => {
            tracing::info!("Generated {} file(s) in {}", results.len(), root.display());
            ok(json!({"success": true, "results": results}))
        }
        Err(e) => failure(&e),
    }
}

fn list_teams(state: &StudioState) -> HttpResponse {
    match state.netlify.list_teams() {
        Ok(teams) => ok(json!({"success": true, "teams": teams})),
        Err(e) => failure(&e),
    }
}

fn list_sites(state: &StudioState) -> HttpResponse {
    match state.netlify.list_sites() {
        Ok(sites) => ok(json!({"success": true, "sites": sites})),
        Err(e) => failure(&e),
    }
}

fn check_cli(state: &StudioState) -> HttpResponse {
    let version = state.netlify.version();
    let installed = version.is_some();
    let logged_in = installed && state.netlify.is_logged_in();
    ok(json!({
        "success": true,
        "cli_installed": installed,
        "logged_in": logged_in,
        "version": version,
    }))
}

fn login(state: &StudioState, body: &PathBody) -> HttpResponse {
    let cli = match cli_for(state, &body.path) {
        Ok(cli) => cli,
        Err(e) => return failure(&e),
    };
    if cli.is_logged_in() {
        return ok(json!({"success": true, "message": "Already logged in"}));
    }
    match cli.login(false) {
        Ok(outcome) => {
            let message = if outcome.success {
                "Logged in"
            } else {
                "Login failed"
            };
            ok(json!({
                "success": outcome.success,
                "message": message,
                "stdout": outcome.stdout,
                "stderr": outcome.stderr,
            }))
        }
        Err(e) => failure(&e),
    }
}

fn init_site(state: &StudioState, body: &InitSiteBody) -> HttpResponse {
    let cli = match cli_for(state, &body.path) {
        Ok(cli) => cli,
        Err(e) => return failure(&e),
    };

    match cli.linked_site() {
        Ok(linked) if linked.success => {
            return ok(json!({
                "success": true,
                "message": "Site already linked",
                "stdout": linked.stdout,
            }));
        }
        Ok(_) => {}
        Err(e) => return failure(&e),
    }

    match cli.create_site(body.site_name.as_deref(), body.account_slug.as_deref()) {
        Ok(outcome) if outcome.success => ok(json!({
            "success": true,
            "message": "Site created",
            "stdout": outcome.stdout,
            "stderr": outcome.stderr,
        })),
        Ok(outcome) => ok(json!({
            "success": false,
            "error": "Failed to create site",
            "stdout": outcome.stdout,
            "stderr": outcome.stderr,
        })),
        Err(e) => failure(&e),
    }
}

fn update_domain(state: &StudioState, body: &UpdateDomainBody) -> HttpResponse {
    let Some(new_name) = body.new_name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    else {
        return ok(json!({"success": false, "error": "Please enter a new site name"}));
    };
    let cli = match cli_for(state, &body.path) {
        Ok(cli) => cli,
        Err(e) => return failure(&e),
    };

    match cli.rename_site(new_name) {
        Ok(outcome) if outcome.success => ok(json!({
            "success": true,
            "message": format!("Site renamed to {}", new_name),
            "stdout": outcome.stdout,
        })),
        Ok(outcome) => ok(json!({
            "success": false,
            "error": "Failed to rename site",
            "stderr": outcome.stderr,
        })),
        Err(e) => failure(&e),
    }
}

fn deploy(state: &StudioState, body: &DeployBody) -> HttpResponse {
    let cli = match cli_for(state, &body.path) {
        Ok(cli) => cli,
        Err(e) => return failure(&e),
    };
    let kind = DeployKind::from_request(body.kind.as_deref().unwrap_or("production"));
    match cli.deploy(kind) {
        Ok(outcome) => {
            if outcome.success {
                tracing::info!("Deployed: {}", outcome.url.as_deref().unwrap_or("(no URL)"));
            }
            HttpResponse::json(200, &outcome)
        }
        Err(e) => failure(&e),
    }
}

fn run_command(state: &StudioState, body: &RunCommandBody) -> HttpResponse {
    if body.command.is_empty() {
        return ok(json!({"success": false, "error": "No command given"}));
    }
    let cli = match cli_for(state, &body.path) {
        Ok(cli) => cli,
        Err(e) => return failure(&e),
    };
    match cli.run_raw(&body.command) {
        Ok(out) => ok(json!({
            "success": out.success,
            "stdout": out.stdout,
            "stderr": out.stderr,
        })),
        Err(e) => failure(&e),
    }
}

fn provider_of(state: &StudioState, name: Option<&str>) -> Result<Provider> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.parse(),
        None => state.assistant.default_provider(),
    }
}

fn context_text(context: &Option<Value>) -> Option<String> {
    match context {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn chat(state: &StudioState, body: &ChatBody) -> HttpResponse {
    let reply = provider_of(state, body.provider.as_deref()).and_then(|provider| {
        let context = context_text(&body.context);
        state.assistant.chat(
            provider,
            body.api_key.as_deref(),
            &body.message,
            context.as_deref(),
        )
    });
    match reply {
        Ok(response) => ok(json!({"success": true, "response": response})),
        Err(e) => failure(&e),
    }
}

fn test_connection(state: &StudioState, body: &TestConnectionBody) -> HttpResponse {
    let reply = provider_of(state, body.provider.as_deref())
        .and_then(|provider| state.assistant.test_connection(provider, body.api_key.as_deref()));
    match reply {
        Ok(response) => ok(json!({"success": true, "response": response})),
        Err(e) => failure(&e),
    }
}
