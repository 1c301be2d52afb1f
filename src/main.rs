use tracing_subscriber::EnvFilter;

/// Bundled config for mobile builds (iOS/Android)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // .env first (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    let entries = BUNDLED_CONFIG
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='));

    for (key, value) in entries {
        let key = key.trim();
        // Variables already in the environment win.
        if std::env::var(key).is_err() {
            // SAFETY: runs at startup before the runtime spawns any threads
            unsafe {
                std::env::set_var(key, value.trim());
            }
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("republica=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn main() {
    load_dotenv();
    if let Err(err) = init_tracing() {
        eprintln!("{err:#}");
    }
    dioxus::launch(republica::ui::App);
}
