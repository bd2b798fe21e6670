// ============================================================================
// CONFIG - Configuración de la capa UI (tiempo de compilación)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Prefijo para las rutas /api/... ("" = mismo origen)
    pub api_base_url: String,
    pub enable_logging: bool,
    pub toast_config: ToastConfig,
    pub table_config: TableConfig,
    pub chart_config: ChartConfig,
    pub onboarding_config: OnboardingConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            enable_logging: true,
            toast_config: ToastConfig::default(),
            table_config: TableConfig::default(),
            chart_config: ChartConfig::default(),
            onboarding_config: OnboardingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    pub default_duration_ms: u32,
    /// Alertas .alert-success del servidor
    pub alert_dismiss_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            alert_dismiss_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub search_debounce_ms: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub category_days: u32,
    pub trend_days: u32,
    pub income_months: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            category_days: 30,
            trend_days: 30,
            income_months: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    pub welcome_delay_ms: u32,
    pub welcome_duration_ms: u32,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            welcome_delay_ms: 2000,
            welcome_duration_ms: 5000,
        }
    }
}

impl UiConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("FINWISE_API_BASE")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_string(),
            enable_logging: parse_or(option_env!("FINWISE_ENABLE_LOGGING"), defaults.enable_logging),
            toast_config: ToastConfig {
                default_duration_ms: parse_or(
                    option_env!("FINWISE_TOAST_MS"),
                    defaults.toast_config.default_duration_ms,
                ),
                alert_dismiss_ms: parse_or(
                    option_env!("FINWISE_ALERT_DISMISS_MS"),
                    defaults.toast_config.alert_dismiss_ms,
                ),
            },
            table_config: TableConfig {
                search_debounce_ms: parse_or(
                    option_env!("FINWISE_SEARCH_DEBOUNCE_MS"),
                    defaults.table_config.search_debounce_ms,
                ),
            },
            chart_config: ChartConfig {
                category_days: parse_or(
                    option_env!("FINWISE_CATEGORY_DAYS"),
                    defaults.chart_config.category_days,
                ),
                trend_days: parse_or(option_env!("FINWISE_TREND_DAYS"), defaults.chart_config.trend_days),
                income_months: parse_or(
                    option_env!("FINWISE_INCOME_MONTHS"),
                    defaults.chart_config.income_months,
                ),
            },
            onboarding_config: OnboardingConfig {
                welcome_delay_ms: parse_or(
                    option_env!("FINWISE_WELCOME_DELAY_MS"),
                    defaults.onboarding_config.welcome_delay_ms,
                ),
                ..defaults.onboarding_config
            },
        }
    }

    /// URL absoluta (o relativa al origen) de un endpoint /api/...
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// Con el logging apagado solo llegan a consola warnings y errores
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: UiConfig = UiConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or::<u32>(Some("abc"), 7), 7);
        assert_eq!(parse_or::<u32>(Some(" 42 "), 7), 42);
        assert_eq!(parse_or::<u32>(None, 7), 7);
    }

    #[test]
    fn test_api_url_joins_base() {
        let mut config = UiConfig::default();
        assert_eq!(config.api_url("/api/budgets/"), "/api/budgets/");
        config.api_base_url = "https://finwise.example".to_string();
        assert_eq!(config.api_url("/api/budgets/"), "https://finwise.example/api/budgets/");
    }

    #[test]
    fn test_logging_switch_sets_console_level() {
        let mut config = UiConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
        assert!(!parse_or(Some("false"), true));
    }
}
