use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Cargar variables de entorno desde .env si existe (FINWISE_API_BASE, FINWISE_TOAST_MS, ...)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE, solo claves con prefijo FINWISE_
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !key.starts_with("FINWISE_") {
                        continue;
                    }

                    // Una variable del entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in [
        "FINWISE_API_BASE",
        "FINWISE_TOAST_MS",
        "FINWISE_ALERT_DISMISS_MS",
        "FINWISE_SEARCH_DEBOUNCE_MS",
        "FINWISE_WELCOME_DELAY_MS",
        "FINWISE_CATEGORY_DAYS",
        "FINWISE_TREND_DAYS",
        "FINWISE_INCOME_MONTHS",
        "FINWISE_ENABLE_LOGGING",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
