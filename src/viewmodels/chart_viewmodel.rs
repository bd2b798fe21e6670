// ============================================================================
// CHART VIEWMODEL - Payload + tema => configuración Chart.js (JSON)
// ============================================================================

use serde_json::{json, Value};

use crate::config::ChartConfig;
use crate::models::{ChartKind, ChartPayload, Theme};

/// Colores por defecto para series sin color propio
pub const DEFAULT_COLORS: [&str; 10] = [
    "#4dabf7", "#51cf66", "#ffd43b", "#ff6b6b", "#a78bfa", "#fb923c", "#22d3ee", "#f472b6", "#a3e635",
    "#facc15",
];

const FONT_FAMILY: &str = "'Segoe UI', system-ui, -apple-system, sans-serif";

/// Colores de texto/grid según el tema
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPalette {
    pub text: &'static str,
    pub muted: &'static str,
    pub grid: &'static str,
    pub tooltip_background: &'static str,
    /// Borde de los segmentos (doughnut/pie)
    pub segment_border: &'static str,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self {
                text: "#ffffff",
                muted: "#b0b0b0",
                grid: "#404040",
                tooltip_background: "#2d2d2d",
                segment_border: "#1a1a1a",
            }
        } else {
            Self {
                text: "#212529",
                muted: "#6c757d",
                grid: "#dee2e6",
                tooltip_background: "#ffffff",
                segment_border: "#ffffff",
            }
        }
    }
}

/// Ruta del endpoint con su ventana temporal
pub fn endpoint_path(kind: ChartKind, config: &ChartConfig) -> String {
    match kind {
        ChartKind::SpendingByCategory => format!("/api/spending-by-category/?days={}", config.category_days),
        ChartKind::SpendingTrend => format!("/api/spending-trend/?days={}", config.trend_days),
        ChartKind::IncomeVsExpenses => format!("/api/income-vs-expenses/?months={}", config.income_months),
        ChartKind::AccountBalance => "/api/account-balance/".to_string(),
        ChartKind::BudgetProgress => "/api/budgets/".to_string(),
    }
}

fn base_options(palette: &ChartPalette, legend: Value) -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": legend,
            "tooltip": {
                "backgroundColor": palette.tooltip_background,
                "titleColor": palette.text,
                "bodyColor": palette.muted,
                "borderColor": palette.grid,
                "borderWidth": 1
            }
        },
        "scales": {
            "x": { "ticks": { "color": palette.muted }, "grid": { "color": palette.grid } },
            "y": { "ticks": { "color": palette.muted }, "grid": { "color": palette.grid } }
        }
    })
}

fn legend(palette: &ChartPalette, position: &str) -> Value {
    json!({
        "position": position,
        "labels": { "color": palette.text, "padding": 15, "font": { "family": FONT_FAMILY } }
    })
}

/// Los gráficos circulares no llevan ejes
fn without_scales(mut options: Value) -> Value {
    if let Some(object) = options.as_object_mut() {
        object.remove("scales");
    }
    options
}

fn cycle_colors(count: usize) -> Vec<&'static str> {
    (0..count).map(|i| DEFAULT_COLORS[i % DEFAULT_COLORS.len()]).collect()
}

/// Configuración completa para `new Chart(canvas, config)`
pub fn chart_config(payload: &ChartPayload, theme: Theme) -> Value {
    let palette = ChartPalette::for_theme(theme);
    match payload {
        ChartPayload::SpendingByCategory(data) => {
            let colors: Vec<String> = if data.colors.len() >= data.categories.len() {
                data.colors.clone()
            } else {
                cycle_colors(data.categories.len()).into_iter().map(String::from).collect()
            };
            json!({
                "type": "doughnut",
                "data": {
                    "labels": data.categories,
                    "datasets": [{
                        "label": "Spending by Category",
                        "data": data.amounts,
                        "backgroundColor": colors,
                        "borderWidth": 2,
                        "borderColor": palette.segment_border
                    }]
                },
                "options": without_scales(base_options(&palette, legend(&palette, "right")))
            })
        }
        ChartPayload::SpendingTrend(data) => json!({
            "type": "line",
            "data": {
                "labels": data.dates,
                "datasets": [{
                    "label": "Daily Spending",
                    "data": data.amounts,
                    "borderColor": "#4dabf7",
                    "backgroundColor": "rgba(77, 171, 247, 0.1)",
                    "tension": 0.4,
                    "fill": true,
                    "borderWidth": 2
                }]
            },
            "options": base_options(&palette, json!({ "display": false }))
        }),
        ChartPayload::IncomeVsExpenses(data) => {
            let months: Vec<&str> = data.data.iter().map(|d| d.month.as_str()).collect();
            let income: Vec<f64> = data.data.iter().map(|d| d.income).collect();
            let expenses: Vec<f64> = data.data.iter().map(|d| d.expenses).collect();
            json!({
                "type": "bar",
                "data": {
                    "labels": months,
                    "datasets": [
                        { "label": "Income", "data": income, "backgroundColor": "#51cf66", "borderColor": "#51cf66", "borderWidth": 2 },
                        { "label": "Expenses", "data": expenses, "backgroundColor": "#ff6b6b", "borderColor": "#ff6b6b", "borderWidth": 2 }
                    ]
                },
                "options": base_options(&palette, legend(&palette, "top"))
            })
        }
        ChartPayload::AccountBalance(data) => {
            let names: Vec<&str> = data.accounts.iter().map(|a| a.name.as_str()).collect();
            let balances: Vec<f64> = data.accounts.iter().map(|a| a.balance).collect();
            json!({
                "type": "pie",
                "data": {
                    "labels": names,
                    "datasets": [{
                        "label": "Account Balance",
                        "data": balances,
                        "backgroundColor": cycle_colors(data.accounts.len()),
                        "borderWidth": 2,
                        "borderColor": palette.segment_border
                    }]
                },
                "options": without_scales(base_options(&palette, legend(&palette, "bottom")))
            })
        }
        ChartPayload::BudgetProgress(data) => {
            let categories: Vec<&str> = data.budgets.iter().map(|b| b.category.as_str()).collect();
            let budgeted: Vec<f64> = data.budgets.iter().map(|b| b.budgeted).collect();
            let spent: Vec<f64> = data.budgets.iter().map(|b| b.spent).collect();
            let spent_fill: Vec<&str> = data
                .budgets
                .iter()
                .map(|b| if b.over_threshold { "rgba(255, 107, 107, 0.5)" } else { "rgba(255, 212, 59, 0.5)" })
                .collect();
            let spent_border: Vec<&str> = data
                .budgets
                .iter()
                .map(|b| if b.over_threshold { "#ff6b6b" } else { "#ffd43b" })
                .collect();

            let mut options = base_options(&palette, legend(&palette, "top"));
            options["indexAxis"] = json!("y");
            json!({
                "type": "bar",
                "data": {
                    "labels": categories,
                    "datasets": [
                        { "label": "Budgeted", "data": budgeted, "backgroundColor": "rgba(77, 171, 247, 0.5)", "borderColor": "#4dabf7", "borderWidth": 2 },
                        { "label": "Spent", "data": spent, "backgroundColor": spent_fill, "borderColor": spent_border, "borderWidth": 2 }
                    ]
                },
                "options": options
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountBalanceEntry, AccountBalances, BudgetEntry, BudgetProgress, SpendingTrend};

    #[test]
    fn test_endpoints_use_configured_windows() {
        let config = ChartConfig::default();
        assert_eq!(
            endpoint_path(ChartKind::SpendingByCategory, &config),
            "/api/spending-by-category/?days=30"
        );
        assert_eq!(
            endpoint_path(ChartKind::IncomeVsExpenses, &config),
            "/api/income-vs-expenses/?months=6"
        );
        assert_eq!(endpoint_path(ChartKind::BudgetProgress, &config), "/api/budgets/");
    }

    #[test]
    fn test_palette_follows_theme() {
        let payload = ChartPayload::SpendingTrend(SpendingTrend {
            dates: vec!["2024-03-01".into()],
            amounts: vec![12.5],
        });
        let dark = chart_config(&payload, Theme::Dark);
        let light = chart_config(&payload, Theme::Light);
        assert_eq!(dark["type"], "line");
        assert_eq!(dark["options"]["scales"]["x"]["grid"]["color"], "#404040");
        assert_eq!(light["options"]["scales"]["x"]["grid"]["color"], "#dee2e6");
        assert_eq!(light["options"]["plugins"]["legend"]["display"], false);
    }

    #[test]
    fn test_account_colors_cycle() {
        let accounts = (0..12)
            .map(|i| AccountBalanceEntry { name: format!("Acc {}", i), balance: i as f64 })
            .collect();
        let config = chart_config(&ChartPayload::AccountBalance(AccountBalances { accounts }), Theme::Light);
        let colors = config["data"]["datasets"][0]["backgroundColor"].as_array().unwrap();
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[10], DEFAULT_COLORS[0]);
        assert!(config["options"].get("scales").is_none());
    }

    #[test]
    fn test_budget_over_threshold_is_red_and_horizontal() {
        let budgets = BudgetProgress {
            budgets: vec![
                BudgetEntry { category: "Food".into(), budgeted: 100.0, spent: 120.0, over_threshold: true },
                BudgetEntry { category: "Fun".into(), budgeted: 50.0, spent: 10.0, over_threshold: false },
            ],
        };
        let config = chart_config(&ChartPayload::BudgetProgress(budgets), Theme::Dark);
        assert_eq!(config["options"]["indexAxis"], "y");
        let spent = &config["data"]["datasets"][1];
        assert_eq!(spent["borderColor"][0], "#ff6b6b");
        assert_eq!(spent["borderColor"][1], "#ffd43b");
    }
}
