// ============================================================================
// CHART SERVICE - Carga de agregados /api/... y puente con Chart.js
// ============================================================================
// ChartApiClient: SOLO comunicación HTTP (stateless).
// ChartBridge: una instancia Chart.js viva por canvas; se destruye antes de
// crear la siguiente y se reconstruye al cambiar el tema.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;

use crate::config::CONFIG;
use crate::dom::get_element_by_id;
use crate::error::{UiError, UiResult};
use crate::models::{
    AccountBalances, BudgetProgress, ChartKind, ChartPayload, IncomeVsExpenses, SpendingByCategory,
    SpendingTrend, Theme,
};
use crate::state::ThemeState;
use crate::utils::chart_ffi::{chart_library_available, Chart};
use crate::utils::to_js_object;
use crate::viewmodels::chart_viewmodel::{chart_config, endpoint_path};
use crate::views::chart_view::{show_canvas, show_empty_state, show_error_state};

/// Cliente API de agregados - SOLO comunicación HTTP
#[derive(Clone)]
pub struct ChartApiClient {
    base_url: String,
}

impl ChartApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.api_base_url.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> UiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url).send().await?;
        if !response.ok() {
            return Err(UiError::Http {
                status: response.status(),
                url,
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn load(&self, kind: ChartKind) -> UiResult<ChartPayload> {
        let path = endpoint_path(kind, &CONFIG.chart_config);
        let payload = match kind {
            ChartKind::SpendingByCategory => {
                ChartPayload::SpendingByCategory(self.get_json::<SpendingByCategory>(&path).await?)
            }
            ChartKind::SpendingTrend => ChartPayload::SpendingTrend(self.get_json::<SpendingTrend>(&path).await?),
            ChartKind::IncomeVsExpenses => {
                ChartPayload::IncomeVsExpenses(self.get_json::<IncomeVsExpenses>(&path).await?)
            }
            ChartKind::AccountBalance => ChartPayload::AccountBalance(self.get_json::<AccountBalances>(&path).await?),
            ChartKind::BudgetProgress => ChartPayload::BudgetProgress(self.get_json::<BudgetProgress>(&path).await?),
        };
        Ok(payload)
    }
}

impl Default for ChartApiClient {
    fn default() -> Self {
        Self::new()
    }
}

struct LiveChart {
    chart: Chart,
    payload: ChartPayload,
}

#[derive(Clone)]
pub struct ChartBridge {
    api: ChartApiClient,
    theme: ThemeState,
    charts: Rc<RefCell<HashMap<ChartKind, LiveChart>>>,
}

fn find_canvas(kind: ChartKind) -> Option<HtmlCanvasElement> {
    get_element_by_id(kind.canvas_id())?.dyn_into::<HtmlCanvasElement>().ok()
}

impl ChartBridge {
    pub fn new(api: ChartApiClient, theme: ThemeState) -> Self {
        Self {
            api,
            theme,
            charts: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Carga todos los gráficos con canvas en la página. Devuelve cuántos.
    pub fn init(&self) -> UiResult<usize> {
        let present: Vec<ChartKind> = ChartKind::ALL
            .iter()
            .copied()
            .filter(|kind| find_canvas(*kind).is_some())
            .collect();
        if present.is_empty() {
            return Ok(0);
        }
        if !chart_library_available() {
            return Err(UiError::MissingElement("window.Chart".to_string()));
        }

        let bridge = self.clone();
        self.theme.subscribe(move |theme| bridge.retheme(theme));

        for kind in &present {
            self.load(*kind);
        }
        Ok(present.len())
    }

    /// reload_chart("spendingTrend") desde scripts de la página
    pub fn reload(&self, name: &str) -> bool {
        match ChartKind::from_name(name) {
            Some(kind) => {
                self.load(kind);
                true
            }
            None => {
                log::warn!("⚠️ [CHART] Gráfico desconocido: {}", name);
                false
            }
        }
    }

    pub fn load(&self, kind: ChartKind) {
        let bridge = self.clone();
        spawn_local(async move {
            let result = bridge.api.load(kind).await;
            bridge.render_result(kind, result);
        });
    }

    fn destroy(&self, kind: ChartKind) {
        if let Some(live) = self.charts.borrow_mut().remove(&kind) {
            live.chart.destroy();
        }
    }

    fn render_result(&self, kind: ChartKind, result: UiResult<ChartPayload>) {
        // El canvas puede haber desaparecido mientras llegaba la respuesta
        let Some(canvas) = find_canvas(kind) else {
            log::debug!("🗑️ [CHART] Canvas {} ya no existe, resultado descartado", kind.canvas_id());
            return;
        };
        self.destroy(kind);

        let outcome = match result {
            Ok(payload) if payload.is_empty() => {
                log::info!("📭 [CHART] {} sin datos", kind.name());
                show_empty_state(&canvas, kind.empty_message()).map_err(UiError::from)
            }
            Ok(payload) => self.create(kind, &canvas, payload, self.theme.current()),
            Err(e) => {
                log::error!("❌ [CHART] Error cargando {}: {}", kind.name(), e);
                show_error_state(&canvas).map_err(UiError::from)
            }
        };
        if let Err(e) = outcome {
            log::error!("❌ [CHART] Error dibujando {}: {}", kind.name(), e);
        }
    }

    fn create(&self, kind: ChartKind, canvas: &HtmlCanvasElement, payload: ChartPayload, theme: Theme) -> UiResult<()> {
        show_canvas(canvas)?;
        let config = to_js_object(&chart_config(&payload, theme))?;
        let chart = Chart::new(canvas, &config)?;
        self.charts.borrow_mut().insert(kind, LiveChart { chart, payload });
        log::info!("📊 [CHART] {} creado", kind.name());
        Ok(())
    }

    /// Reconstruye los gráficos vivos con la paleta del nuevo tema
    pub fn retheme(&self, theme: Theme) {
        let live: Vec<(ChartKind, ChartPayload)> = self
            .charts
            .borrow()
            .iter()
            .map(|(kind, live)| (*kind, live.payload.clone()))
            .collect();

        for (kind, payload) in live {
            self.destroy(kind);
            let Some(canvas) = find_canvas(kind) else {
                continue;
            };
            if let Err(e) = self.create(kind, &canvas, payload, theme) {
                log::error!("❌ [CHART] Error re-tematizando {}: {}", kind.name(), e);
            }
        }
    }
}
