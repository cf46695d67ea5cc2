//! Single binary web server: REST API over in-memory tournament snapshots.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MATCH_DURATION_MINUTES (default match length for new
//! tournaments), INACTIVITY_HOURS (idle tournaments are dropped after this long).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_integrity::{
    CustomRules, PushBackAnchor, SportType, Tournament, TournamentError, TournamentId,
    DEFAULT_MATCH_DURATION_MINUTES,
};

/// Per-tournament entry: snapshot + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Settings read from the environment at startup.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    match_duration_minutes: i64,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = env_parse("PORT").unwrap_or_else(default_port);
        let match_duration_minutes =
            env_parse("MATCH_DURATION_MINUTES").unwrap_or(DEFAULT_MATCH_DURATION_MINUTES);
        let inactivity_hours: u64 = env_parse("INACTIVITY_HOURS").unwrap_or(12);
        Self {
            host,
            port,
            match_duration_minutes,
            inactivity_timeout: Duration::from_secs(inactivity_hours * 3600),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring invalid {}={:?}", key, raw);
                None
            }
        },
        Err(_) => None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// Free-form; unknown sports fall back to soccer rules.
    #[serde(default)]
    sport: Option<String>,
    #[serde(default)]
    custom_rules: Option<CustomRules>,
    #[serde(default)]
    match_duration_minutes: Option<i64>,
}

#[derive(Deserialize)]
struct AddTeamBody {
    #[serde(default)]
    id: Option<String>,
    name: String,
}

#[derive(Deserialize)]
struct AddMatchBody {
    home_team_id: String,
    away_team_id: String,
    pitch_id: String,
    scheduled_time: DateTime<Utc>,
    #[serde(default)]
    sort_order: Option<i64>,
}

#[derive(Deserialize)]
struct RecordResultBody {
    home_score: u32,
    away_score: u32,
}

/// Push-back request. `from_sort_order` wins if both anchors are given; neither shifts every open match.
#[derive(Deserialize)]
struct PushBackBody {
    delay_minutes: i64,
    #[serde(default)]
    from_sort_order: Option<i64>,
    #[serde(default)]
    from_time: Option<DateTime<Utc>>,
}

impl PushBackBody {
    fn anchor(&self) -> Option<PushBackAnchor> {
        self.from_sort_order
            .map(PushBackAnchor::SortOrder)
            .or(self.from_time.map(PushBackAnchor::Time))
    }
}

#[derive(Deserialize)]
struct EvacuatePitchBody {
    from_pitch: String,
    to_pitch: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

/// Path segments: tournament id and team id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: String,
}

/// Path segments: tournament id and pitch id.
#[derive(Deserialize)]
struct TournamentPitchPath {
    id: TournamentId,
    pitch_id: String,
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament, refresh its activity time, and run `f` on it.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Map an edit result to the updated tournament or a 400.
fn respond<T>(t: &Tournament, result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-integrity",
    })
}

/// Create a new draft tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let sport: SportType = body
        .sport
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let duration = body
        .match_duration_minutes
        .unwrap_or(config.match_duration_minutes);
    let tournament =
        Tournament::new(body.name, sport, body.custom_rules.as_ref()).with_match_duration(duration);
    let id = tournament.id;
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Enter a team.
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        let result = match body.id {
            Some(id) => t.add_team_with_id(id, body.name),
            None => t.add_team(body.name),
        };
        respond(t, result)
    })
}

/// Withdraw a team; its open matches become walkovers.
#[post("/api/tournaments/{id}/teams/{team_id}/dropout")]
async fn api_drop_out_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.drop_out_team(&path.team_id);
        if let Ok(n) = &result {
            log::info!("Team {} dropped out of {}: {} walkover(s)", path.team_id, t.id, n);
        }
        respond(t, result)
    })
}

/// Schedule one match.
#[post("/api/tournaments/{id}/matches")]
async fn api_add_match(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddMatchBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        let result = t.add_match(
            &body.home_team_id,
            &body.away_team_id,
            body.pitch_id,
            body.scheduled_time,
            body.sort_order,
        );
        respond(t, result)
    })
}

/// Import a CSV schedule (request body is the CSV text).
#[post("/api/tournaments/{id}/matches/import")]
async fn api_import_matches(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.import_matches_csv(body.as_bytes());
        respond(t, result)
    })
}

/// Record the final score of a match.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.record_result(&path.match_id, body.home_score, body.away_score);
        respond(t, result)
    })
}

#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.start_match(&path.match_id);
        respond(t, result)
    })
}

#[post("/api/tournaments/{id}/matches/{match_id}/cancel")]
async fn api_cancel_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.cancel_match(&path.match_id);
        respond(t, result)
    })
}

/// Delay open matches, optionally from a sort order or time onward.
#[post("/api/tournaments/{id}/schedule/push-back")]
async fn api_push_back(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PushBackBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.push_back(body.delay_minutes, body.anchor());
        if let Ok(shifted) = &result {
            log::info!("Pushed back {} match(es) in {} by {} min", shifted, t.id, body.delay_minutes);
        }
        respond(t, result)
    })
}

/// Move scheduled matches from one pitch to another.
#[post("/api/tournaments/{id}/schedule/evacuate")]
async fn api_evacuate_pitch(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<EvacuatePitchBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let moved = t.evacuate_pitch(&body.from_pitch, &body.to_pitch);
        log::info!(
            "Evacuated {} match(es) in {} from {} to {}",
            moved,
            t.id,
            body.from_pitch,
            body.to_pitch
        );
        HttpResponse::Ok().json(t)
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.standings()))
}

/// Validation report: every pitch and team clash.
#[get("/api/tournaments/{id}/conflicts")]
async fn api_conflicts(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.validate()))
}

/// Next free start time on a pitch (null when the pitch has no bookings).
#[get("/api/tournaments/{id}/pitches/{pitch_id}/next-slot")]
async fn api_next_slot(state: AppState, path: Path<TournamentPitchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let slot = tournament_integrity::next_available_slot(
            &t.matches,
            &path.pitch_id,
            t.match_duration_minutes,
        );
        HttpResponse::Ok().json(serde_json::json!({ "next_slot": slot }))
    })
}

/// Publish gate decision without changing anything.
#[get("/api/tournaments/{id}/publish")]
async fn api_publish_check(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.publish_decision()))
}

/// Go live (Draft only, gate must pass).
#[post("/api/tournaments/{id}/publish")]
async fn api_publish(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.publish();
        respond(t, result)
    })
}

/// Close a live tournament once every match is completed or cancelled.
#[post("/api/tournaments/{id}/finish")]
async fn api_finish(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t.finish();
        respond(t, result)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_drop_out_team)
            .service(api_add_match)
            .service(api_import_matches)
            .service(api_record_result)
            .service(api_start_match)
            .service(api_cancel_match)
            .service(api_push_back)
            .service(api_evacuate_pitch)
            .service(api_standings)
            .service(api_conflicts)
            .service(api_next_slot)
            .service(api_publish_check)
            .service(api_publish)
            .service(api_finish)
    })
    .bind(bind)?
    .run()
    .await
}
