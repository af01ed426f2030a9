use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use minijinja::context;
use std::sync::Arc;

use crate::classifier::{DatasetTag, RULES};
use crate::web::state::AppState;
use crate::web::templates::render_template;

// Main UI entry point
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let datasets: Vec<&str> = DatasetTag::ALL.iter().map(DatasetTag::as_str).collect();

    Html(render_template(
        &state.template_env,
        "index.html",
        context! {
            backend => state.generator.backend(),
            rules => RULES,
            datasets => datasets,
        },
    ))
}

pub async fn not_found_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(render_template(
            &state.template_env,
            "error.html",
            context! { message => "Sayfa bulunamadı." },
        )),
    )
}
