//! Single binary web server: REST API for tournaments and qualifiers, live updates over SSE.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, MIN_TEAMS, MAX_TEAMS,
//! EVENT_BUFFER (see `tennis_bracket_web::config`).

use actix_web::{
    delete, error::InternalError, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use std::convert::Infallible;
use std::sync::Arc;
use serde::Deserialize;
use tennis_bracket_web::{
    export, BracketError, BroadcastNotifier, Config, MemoryStore, Notifier, Qualifier,
    QualifierService, Tournament, TournamentService,
};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Services shared by all workers. Each aggregate is locked independently inside its store.
struct AppServices {
    tournaments: TournamentService<MemoryStore<Tournament>>,
    qualifiers: QualifierService<MemoryStore<Qualifier>>,
    events: Arc<BroadcastNotifier>,
}

type AppState = Data<AppServices>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    viewers: usize,
}

#[derive(Deserialize)]
struct CreateBody {
    name: String,
    #[serde(alias = "teamCount")]
    team_count: u32,
}

#[derive(Deserialize)]
struct RenameBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    score1: i32,
    score2: i32,
}

/// Path segment: any tournament, qualifier, team or match id.
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::NotFound(..) => HttpResponse::NotFound().json(body),
        BracketError::StoreUnavailable(_) => {
            log::error!("{}", e);
            HttpResponse::ServiceUnavailable().json(body)
        }
        BracketError::InvalidTeamCount { .. }
        | BracketError::InvalidScore(_)
        | BracketError::InvalidBracketPosition { .. }
        | BracketError::InvalidName => HttpResponse::BadRequest().json(body),
    }
}

/// Malformed or mistyped request bodies get the same `{"error": ...}` shape as domain errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({ "error": format!("Invalid request body: {}", err) });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Ids that are not UUIDs cannot name anything: answered as not found.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({ "error": format!("Invalid id: {}", err) });
        InternalError::from_response(err, HttpResponse::NotFound().json(body)).into()
    })
}

fn respond<T: serde::Serialize>(result: Result<T, BracketError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

fn csv_response(result: Result<Result<Vec<u8>, csv::Error>, BracketError>, file_name: String) -> HttpResponse {
    match result {
        Ok(Ok(bytes)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file_name),
            ))
            .body(bytes),
        Ok(Err(e)) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Export failed" }))
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health(state: AppState) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-bracket-web",
        viewers: state.events.viewer_count(),
    })
}

/// Live event stream: one SSE message per committed change, until the client disconnects.
#[get("/api/events")]
async fn api_events(state: AppState) -> HttpResponse {
    let receiver = state.events.subscribe();
    let stream = futures_util::stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(data) => {
                        let message = format!("event: {}\ndata: {}\n\n", event.name(), data);
                        return Some((Ok::<_, Infallible>(Bytes::from(message)), receiver));
                    }
                    Err(e) => log::warn!("Skipping unserializable {} event: {}", event.name(), e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Viewer fell behind, skipped {} event(s)", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}

/// List tournaments, newest first, with match progress.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(state.tournaments.list())
}

/// Create a tournament: teams, full bracket, round 1 seeded.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateBody>) -> HttpResponse {
    match state.tournaments.create(&body.name, body.team_count) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.tournaments.get(path.id))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(
        state
            .tournaments
            .delete(path.id)
            .map(|()| serde_json::json!({ "success": true })),
    )
}

#[get("/api/tournaments/{id}/export")]
async fn api_export_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let result = state
        .tournaments
        .snapshot(path.id)
        .map(|t| export::tournament_csv(&t));
    csv_response(result, format!("tournament-{}.csv", path.id))
}

#[put("/api/teams/{id}")]
async fn api_rename_team(state: AppState, path: Path<IdPath>, body: Json<RenameBody>) -> HttpResponse {
    respond(state.tournaments.rename_team(path.id, &body.name))
}

/// Record a score; the winner is advanced and the updated tournament returned.
#[put("/api/matches/{id}/score")]
async fn api_record_score(state: AppState, path: Path<IdPath>, body: Json<ScoreBody>) -> HttpResponse {
    respond(state.tournaments.record_score(path.id, body.score1, body.score2))
}

#[get("/api/qualifiers")]
async fn api_list_qualifiers(state: AppState) -> HttpResponse {
    respond(state.qualifiers.list())
}

#[post("/api/qualifiers")]
async fn api_create_qualifier(state: AppState, body: Json<CreateBody>) -> HttpResponse {
    match state.qualifiers.create(&body.name, body.team_count) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(e) => error_response(&e),
    }
}

#[get("/api/qualifiers/{id}")]
async fn api_get_qualifier(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.qualifiers.get(path.id))
}

#[delete("/api/qualifiers/{id}")]
async fn api_delete_qualifier(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(
        state
            .qualifiers
            .delete(path.id)
            .map(|()| serde_json::json!({ "success": true })),
    )
}

#[get("/api/qualifiers/{id}/export")]
async fn api_export_qualifier(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let result = state
        .qualifiers
        .snapshot(path.id)
        .map(|q| export::qualifier_csv(&q));
    csv_response(result, format!("qualifier-{}.csv", path.id))
}

#[put("/api/qualifier-teams/{id}")]
async fn api_rename_qualifier_team(state: AppState, path: Path<IdPath>, body: Json<RenameBody>) -> HttpResponse {
    respond(state.qualifiers.rename_team(path.id, &body.name))
}

#[put("/api/qualifier-matches/{id}/score")]
async fn api_record_qualifier_score(state: AppState, path: Path<IdPath>, body: Json<ScoreBody>) -> HttpResponse {
    respond(state.qualifiers.record_score(path.id, body.score1, body.score2))
}

fn app_state(config: &Config) -> AppState {
    let events = Arc::new(BroadcastNotifier::new(config.event_buffer));
    let notifier: Arc<dyn Notifier> = events.clone();
    Data::new(AppServices {
        tournaments: TournamentService::new(MemoryStore::new(), notifier.clone(), config.limits),
        qualifiers: QualifierService::new(MemoryStore::new(), notifier, config.limits),
        events,
    })
}

/// Extractor settings and every route.
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(api_health)
        .service(api_events)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_export_tournament)
        .service(api_rename_team)
        .service(api_record_score)
        .service(api_list_qualifiers)
        .service(api_create_qualifier)
        .service(api_get_qualifier)
        .service(api_delete_qualifier)
        .service(api_export_qualifier)
        .service(api_rename_qualifier_team)
        .service(api_record_qualifier_score);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!(
        "Starting server at http://{}:{} (teams {}..={})",
        config.host,
        config.port,
        config.limits.min,
        config.limits.max
    );

    let state = app_state(&config);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[actix_web::test]
    async fn mistyped_body_is_a_json_bad_request() {
        let app = test::init_service(App::new().app_data(app_state(&config())).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(json!({ "name": "Cup", "teamCount": -4 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[actix_web::test]
    async fn missing_score_field_is_a_json_bad_request() {
        let app = test::init_service(App::new().app_data(app_state(&config())).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(json!({ "name": "Cup", "team_count": 2 }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let match_id = created["matches"][0]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/matches/{}/score", match_id))
            .set_json(json!({ "score1": 6 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());

        // Nothing was recorded
        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{}", created["id"].as_str().unwrap()))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["completed_matches"], 0);
    }

    #[actix_web::test]
    async fn non_uuid_id_is_a_json_not_found() {
        let app = test::init_service(App::new().app_data(app_state(&config())).configure(routes)).await;

        let req = test::TestRequest::get().uri("/api/tournaments/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn domain_errors_keep_their_status() {
        let app = test::init_service(App::new().app_data(app_state(&config())).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(json!({ "name": "Cup", "teamCount": 6 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
