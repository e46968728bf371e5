use std::path::PathBuf;

use chrono::Local;
use log::{error, info};
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::{json, Json, Value};
use rocket::{get, post, routes, Build, Rocket, State};

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::html;
use crate::loader::TableCache;
use crate::models::ReportSummary;
use crate::report;

pub struct AppState {
    pub csv_path: PathBuf,
    pub config: DashboardConfig,
    pub cache: TableCache,
}

impl AppState {
    pub fn new(csv_path: PathBuf, config: DashboardConfig) -> Self {
        Self {
            csv_path,
            config,
            cache: TableCache::new(),
        }
    }

    fn render(&self, top: Option<usize>) -> Result<String> {
        let records = self.cache.get(&self.csv_path)?;
        let summary = report::summarize(&records)?;
        let view = report::build_view(
            &records,
            &summary,
            top.unwrap_or(self.config.default_top_n),
            &self.config,
            &Local::now(),
        );
        Ok(html::render_page(&view))
    }

    fn summary(&self) -> Result<ReportSummary> {
        let records = self.cache.get(&self.csv_path)?;
        report::summarize(&records)
    }
}

#[get("/?<top>")]
pub fn dashboard(state: &State<AppState>, top: Option<usize>) -> (Status, RawHtml<String>) {
    match state.render(top) {
        Ok(page) => (Status::Ok, RawHtml(page)),
        Err(e) => {
            error!("Failed to render dashboard: {e}");
            (
                Status::InternalServerError,
                RawHtml(html::render_error_page(&e, &state.config)),
            )
        }
    }
}

#[get("/api/summary")]
pub fn summary(state: &State<AppState>) -> (Status, Json<Value>) {
    match state.summary() {
        Ok(summary) => (Status::Ok, Json(json!(summary))),
        Err(e) => {
            error!("Failed to summarize ranking: {e}");
            (
                Status::InternalServerError,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

/// Drops the cached table so the next request reads the CSV again.
#[post("/api/reload")]
pub fn reload(state: &State<AppState>) -> Status {
    state.cache.invalidate();
    info!("Cache invalidated for {}", state.csv_path.display());
    Status::NoContent
}

#[get("/health")]
pub fn health() -> &'static str {
    "ok"
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes![dashboard, summary, reload, health])
}
