//! Single binary web server: landing page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, ADMIN_TOKEN.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key, delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use football_cup_web::{
    add_team_manual, bracket_to_csv, confirm_team, generate_bracket, mark_team_paid,
    record_match_result, register_team, reject_team, shortlist_team, BracketStatus, MatchId,
    MatchPhase, RegistrationMode, TeamEntryId, Tournament, TournamentError, TournamentId,
    TournamentSummary,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory state: tournaments by id. Every operation takes the write lock,
/// validates before mutating, and mutates in full or not at all; the lock is
/// the transactional boundary for generation and result recording.
type AppState = Data<RwLock<HashMap<TournamentId, Tournament>>>;

/// Session key holding the caller's role.
const ROLE_KEY: &str = "role";
const ADMIN_ROLE: &str = "admin";

/// Runtime configuration, read once in `main` and handed to the handlers
/// that need it. Nothing here is global or ambiently cached.
struct AppConfig {
    host: String,
    port: u16,
    admin_token: String,
}

impl AppConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let admin_token = match std::env::var("ADMIN_TOKEN") {
            Ok(t) if !t.is_empty() => t,
            _ => {
                log::warn!("ADMIN_TOKEN not set; using the development default");
                "dev-admin-token".to_string()
            }
        };
        Self {
            host,
            port,
            admin_token,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AdminLoginBody {
    token: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    slug: Option<String>,
    season: Option<String>,
    #[serde(default = "default_max_teams")]
    max_teams: u32,
    #[serde(default)]
    registration_mode: RegistrationMode,
}

fn default_max_teams() -> u32 {
    32
}

#[derive(Deserialize)]
struct TeamNameBody {
    name: String,
}

#[derive(Deserialize)]
struct MatchResultBody {
    score_a: i64,
    score_b: i64,
    penalties_a: Option<i64>,
    penalties_b: Option<i64>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: tournament slug (e.g. /api/tournaments/slug/{slug})
#[derive(Deserialize)]
struct SlugPath {
    slug: String,
}

/// Path segments: tournament id and team entry id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamEntryId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// Bracket grouped by round, with team names resolved for display.
#[derive(Serialize)]
struct BracketResponse {
    bracket_status: BracketStatus,
    rounds: Vec<BracketRound>,
}

#[derive(Serialize)]
struct BracketRound {
    round: u32,
    matches: Vec<BracketMatchView>,
}

#[derive(Serialize)]
struct BracketMatchView {
    id: MatchId,
    match_number: u32,
    team_a: Option<String>,
    team_b: Option<String>,
    score_a: Option<u32>,
    score_b: Option<u32>,
    penalties_a: Option<u32>,
    penalties_b: Option<u32>,
    winner: Option<String>,
    phase: MatchPhase,
}

fn bracket_view(t: &Tournament) -> BracketResponse {
    let mut rounds = Vec::new();
    for round in 1..=t.total_rounds() {
        let mut in_round: Vec<_> = t.matches.iter().filter(|m| m.round == round).collect();
        in_round.sort_by_key(|m| m.match_number);
        rounds.push(BracketRound {
            round,
            matches: in_round
                .into_iter()
                .map(|m| BracketMatchView {
                    id: m.id,
                    match_number: m.match_number,
                    team_a: m.team_a.and_then(|id| t.team_name(id)).map(String::from),
                    team_b: m.team_b.and_then(|id| t.team_name(id)).map(String::from),
                    score_a: m.score_a,
                    score_b: m.score_b,
                    penalties_a: m.penalties_a,
                    penalties_b: m.penalties_b,
                    winner: m
                        .winner_team_id
                        .and_then(|id| t.team_name(id))
                        .map(String::from),
                    phase: m.phase(),
                })
                .collect(),
        });
    }
    BracketResponse {
        bracket_status: t.bracket_status,
        rounds,
    }
}

fn is_admin(session: &Session) -> bool {
    matches!(session.get::<String>(ROLE_KEY), Ok(Some(role)) if role == ADMIN_ROLE)
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admin session required" }))
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Business errors mapped to their HTTP classification: missing records are
/// 404, everything else is a business-rule 400.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound | TournamentError::TeamNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-cup-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Exchange the shared admin token for a session with the admin role.
#[post("/api/admin/session")]
async fn api_admin_login(
    config: Data<AppConfig>,
    session: Session,
    body: Json<AdminLoginBody>,
) -> HttpResponse {
    if body.token != config.admin_token {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "error": "Invalid admin token" }));
    }
    if session.insert(ROLE_KEY, ADMIN_ROLE).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "role": ADMIN_ROLE }))
}

#[delete("/api/admin/session")]
async fn api_admin_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (admin). Slug must be unique across tournaments.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let tournament = match Tournament::new(
        body.name.clone(),
        body.slug.clone(),
        body.season.clone(),
        body.max_teams,
        body.registration_mode,
    ) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if g.values().any(|t| t.slug == tournament.slug) {
        return error_response(&TournamentError::DuplicateSlug);
    }
    log::info!(
        "Created tournament '{}' ({}, capacity {})",
        tournament.name,
        tournament.slug,
        tournament.max_teams
    );
    let id = tournament.id;
    g.insert(id, tournament);
    HttpResponse::Ok().json(&g[&id])
}

/// List all tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut list: Vec<TournamentSummary> = g.values().map(|t| t.summary()).collect();
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    HttpResponse::Ok().json(list)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => no_tournament(),
    }
}

/// Get a tournament by slug (the handle used in shared links).
#[get("/api/tournaments/slug/{slug}")]
async fn api_get_tournament_by_slug(state: AppState, path: Path<SlugPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.values().find(|t| t.slug == path.slug) {
        Some(t) => HttpResponse::Ok().json(t),
        None => no_tournament(),
    }
}

/// Public team registration (tournament must be open and bracket not drawn).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TeamNameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match register_team(t, &body.name) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Admin adds a team directly (confirmed, fee waived).
#[post("/api/tournaments/{id}/teams/manual")]
async fn api_add_team_manual(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<TeamNameBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match add_team_manual(t, &body.name) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Shortlist an applied team (admin).
#[post("/api/tournaments/{id}/teams/{team_id}/shortlist")]
async fn api_shortlist_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match shortlist_team(t, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Confirm a team into the draw pool (admin).
#[post("/api/tournaments/{id}/teams/{team_id}/confirm")]
async fn api_confirm_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match confirm_team(t, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Reject a team (admin).
#[post("/api/tournaments/{id}/teams/{team_id}/reject")]
async fn api_reject_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match reject_team(t, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Record the entry fee as paid (admin; stands in for the gateway callback).
#[post("/api/tournaments/{id}/teams/{team_id}/paid")]
async fn api_mark_team_paid(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match mark_team_paid(t, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Draw the bracket (admin). Fails if already drawn or too few teams.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match generate_bracket(t) {
        Ok(()) => {
            log::info!(
                "Drew bracket for '{}': {} matches over {} rounds",
                t.name,
                t.matches.len(),
                t.total_rounds()
            );
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(&e),
    }
}

/// Bracket grouped by round, team names resolved.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(bracket_view(t)),
        None => no_tournament(),
    }
}

/// Record a match result (admin). Winner advances to the next round.
#[post("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    session: Session,
    path: Path<TournamentMatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match record_match_result(
        t,
        path.match_id,
        body.score_a,
        body.score_b,
        body.penalties_a,
        body.penalties_b,
    ) {
        Ok(()) => {
            log::info!(
                "Recorded result {}-{} for match {} in '{}'",
                body.score_a,
                body.score_b,
                path.match_id,
                t.name
            );
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(&e),
    }
}

/// Bracket as CSV for offline admin work.
#[get("/api/tournaments/{id}/matches.csv")]
async fn api_export_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get(&path.id) {
        Some(t) => t,
        None => return no_tournament(),
    };
    match bracket_to_csv(t) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed for {}: {}", t.id, e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, Tournament>::new()));
    let config = Data::new(config);
    // Fresh key per process: admin sessions do not survive a restart.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index))
            .service(api_health)
            .service(favicon)
            .service(api_admin_login)
            .service(api_admin_logout)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament_by_slug)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_add_team_manual)
            .service(api_shortlist_team)
            .service(api_confirm_team)
            .service(api_reject_team)
            .service(api_mark_team_paid)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_record_result)
            .service(api_export_matches)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
