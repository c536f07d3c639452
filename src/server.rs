//! HTTP surface: serves the dashboard page and answers input changes with
//! Plotly figures for the affected outputs.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::controller::{default_bindings, evaluate, Binding, InputId, Inputs, UnknownInput};
use crate::data::model::{LaunchDataset, PayloadRange};
use crate::layout::DashboardLayout;
use crate::view::plotly;

#[derive(Clone)]
pub struct ServerState {
    dataset: Arc<LaunchDataset>,
    bindings: Arc<Vec<Binding>>,
    layout: Arc<DashboardLayout>,
}

impl ServerState {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            dataset,
            bindings: Arc::new(default_bindings()),
            layout: Arc::new(DashboardLayout::default()),
        }
    }
}

/// Query string of `GET /api/update`. Absent values take the layout defaults.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub changed: Option<String>,
}

impl UpdateQuery {
    pub fn resolve(&self, layout: &DashboardLayout) -> Result<(Inputs, Option<InputId>), UnknownInput> {
        let site = match &self.site {
            Some(s) => s.parse().unwrap_or_default(),
            None => layout.default_site(),
        };
        let defaults = layout.payload_slider.default_range();
        let payload = PayloadRange::new(
            self.low.unwrap_or(defaults.low),
            self.high.unwrap_or(defaults.high),
        );
        let changed = self.changed.as_deref().map(str::parse::<InputId>).transpose()?;
        Ok((Inputs { site, payload }, changed))
    }
}

/// Output id → Plotly figure for every binding the change affects.
pub fn update_outputs(
    state: &ServerState,
    query: &UpdateQuery,
) -> Result<BTreeMap<&'static str, JsonValue>, UnknownInput> {
    let (inputs, changed) = query.resolve(&state.layout)?;
    Ok(evaluate(&state.bindings, &state.dataset, &inputs, changed)
        .into_iter()
        .map(|(id, spec)| (id.as_str(), plotly::figure(&spec)))
        .collect())
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/layout", get(layout_handler))
        .route("/api/update", get(update_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, dataset: Arc<LaunchDataset>) -> std::io::Result<()> {
    let app = router(ServerState::new(dataset));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn layout_handler(State(state): State<ServerState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn update_handler(
    State(state): State<ServerState>,
    Query(query): Query<UpdateQuery>,
) -> impl IntoResponse {
    match update_outputs(&state, &query) {
        Ok(outputs) => (StatusCode::OK, Json(outputs)).into_response(),
        Err(e) => {
            log::warn!("rejected update: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>SpaceX Launch Records Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { font-family: sans-serif; margin: 2em; }
  h1 { text-align: center; color: #503D36; font-size: 40px; }
  .range { display: flex; gap: 1em; align-items: center; }
</style>
</head>
<body>
<h1 id="heading"></h1>
<input type="search" id="site-search" hidden>
<select id="site-dropdown"></select>
<br>
<div id="success-pie-chart"></div>
<br>
<p>Payload range (Kg):</p>
<div class="range" id="payload-slider">
  <input type="range" id="payload-low" list="payload-marks">
  <input type="range" id="payload-high" list="payload-marks">
  <span id="payload-label"></span>
</div>
<datalist id="payload-marks"></datalist>
<div id="success-payload-scatter-chart"></div>
<script>
const low = document.getElementById("payload-low");
const high = document.getElementById("payload-high");
const site = document.getElementById("site-dropdown");
const search = document.getElementById("site-search");

async function update(changed) {
  document.getElementById("payload-label").textContent = `${low.value} – ${high.value}`;
  const params = new URLSearchParams({ site: site.value, low: low.value, high: high.value });
  if (changed) params.set("changed", changed);
  const resp = await fetch(`/api/update?${params}`);
  if (!resp.ok) return;
  const outputs = await resp.json();
  for (const [id, fig] of Object.entries(outputs)) {
    Plotly.react(id, fig.data, fig.layout);
  }
}

async function init() {
  const layout = await (await fetch("/api/layout")).json();
  document.getElementById("heading").textContent = layout.heading;
  const d = layout.site_dropdown;
  for (const opt of d.options) {
    site.add(new Option(opt.label, opt.value, false, opt.value === d.value));
  }
  if (d.searchable) {
    search.hidden = false;
    search.placeholder = d.placeholder;
    search.addEventListener("input", () => {
      const needle = search.value.trim().toLowerCase();
      for (const el of site.options) {
        el.hidden = needle !== "" && !el.text.toLowerCase().includes(needle)
          && !el.value.toLowerCase().includes(needle);
      }
    });
  }
  const s = layout.payload_slider;
  const marks = document.getElementById("payload-marks");
  for (const m of s.marks) {
    marks.appendChild(new Option(String(m), m));
  }
  for (const [input, value] of [[low, s.value[0]], [high, s.value[1]]]) {
    input.min = s.min; input.max = s.max; input.step = s.step; input.value = value;
    input.addEventListener("change", () => update(s.id));
  }
  site.addEventListener("change", () => update(layout.site_dropdown.id));
  update(null);
}

init();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;
    use crate::layout::{PAYLOAD_SLIDER_ID, SITE_DROPDOWN_ID};

    fn state() -> ServerState {
        ServerState::new(Arc::new(sample_dataset()))
    }

    #[test]
    fn missing_values_fall_back_to_layout_defaults() {
        let layout = DashboardLayout::default();
        let (inputs, changed) = UpdateQuery::default().resolve(&layout).unwrap();
        assert_eq!(inputs, Inputs::default());
        assert_eq!(changed, None);
    }

    #[test]
    fn initial_update_returns_both_outputs() {
        let outputs = update_outputs(&state(), &UpdateQuery::default()).unwrap();
        assert_eq!(
            outputs.keys().copied().collect::<Vec<_>>(),
            vec!["success-payload-scatter-chart", "success-pie-chart"]
        );
    }

    #[test]
    fn slider_change_only_returns_scatter() {
        let query = UpdateQuery {
            site: Some("VAFB SLC-4E".into()),
            low: Some(2000.0),
            high: Some(4000.0),
            changed: Some("payload-slider".into()),
        };
        let outputs = update_outputs(&state(), &query).unwrap();
        assert_eq!(outputs.len(), 1);
        let fig = &outputs["success-payload-scatter-chart"];
        assert_eq!(
            fig["layout"]["title"]["text"],
            "Correlation between Payload and Success for VAFB SLC-4E"
        );
    }

    #[test]
    fn unknown_changed_id_is_rejected() {
        let query = UpdateQuery {
            changed: Some("launch-slider".into()),
            ..Default::default()
        };
        assert_eq!(
            update_outputs(&state(), &query).unwrap_err(),
            UnknownInput("launch-slider".into())
        );
    }

    #[tokio::test]
    async fn unknown_changed_id_answers_bad_request() {
        let query = UpdateQuery {
            changed: Some("nope".into()),
            ..Default::default()
        };
        let resp = update_handler(State(state()), Query(query)).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn known_changed_id_answers_ok() {
        let query = UpdateQuery {
            changed: Some(SITE_DROPDOWN_ID.into()),
            ..Default::default()
        };
        let resp = update_handler(State(state()), Query(query)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn layout_endpoint_returns_default_layout() {
        let Json(layout) = layout_handler(State(state())).await;
        assert_eq!(layout, DashboardLayout::default());
    }

    #[tokio::test]
    async fn index_page_wires_widget_ids() {
        let Html(page) = index_handler().await;
        for id in [
            SITE_DROPDOWN_ID,
            PAYLOAD_SLIDER_ID,
            "site-search",
            "payload-marks",
            "success-pie-chart",
            "success-payload-scatter-chart",
        ] {
            assert!(page.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
        assert!(page.contains("plotly"));
    }
}
