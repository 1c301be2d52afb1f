use crate::ai::Assistant;
use crate::config::AppConfig;
use crate::credentials::CredentialResolver;
use crate::theme::DARK;
use crate::views::chat::{ChatButton, ChatPopup};
use crate::views::key_storage::{browser_key_cache, hydrate as hydrate_keys};
use crate::views::settings::{ApiKeyManager, ProfileMenu};
use crate::views::shared::{ToastHost, use_toaster_provider};
use crate::views::voice_bridge::detect_platform;
use crate::views::{CashView, ForYouView, TaxStatementView, WealthView};
use crate::voice::{DeviceClass, PlatformCapabilities, VoiceService};
use dioxus::prelude::*;
use tracing::info;

const REPUBLICA_CSS: Asset = asset!("/assets/republica.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    ForYou,
    Wealth,
    Cash,
    TaxStatement,
}

const TABS: [(Screen, &str); 3] = [
    (Screen::ForYou, "For You"),
    (Screen::Wealth, "Wealth"),
    (Screen::Cash, "Cash"),
];

#[component]
pub fn App() -> Element {
    let config = use_hook(|| {
        let config = AppConfig::from_env();
        info!(
            secret_store = config.secret_store.is_some(),
            "configuration loaded"
        );
        config
    });
    let key_cache = use_hook(browser_key_cache);
    let assistant = use_context_provider(|| {
        let credentials = match &key_cache {
            Some(cache) => CredentialResolver::with_cache(&config, cache.clone()),
            None => CredentialResolver::from_config(&config),
        };
        Assistant::with_credentials(&config, credentials)
    });
    use_context_provider(|| VoiceService::from_config(&config, assistant.credentials().clone()));
    use_future(move || {
        let key_cache = key_cache.clone();
        async move {
            if let Some(cache) = key_cache {
                hydrate_keys(&cache).await;
            }
        }
    });

    let mut platform = use_context_provider(|| {
        Signal::new(PlatformCapabilities::new(DeviceClass::Standard, Vec::new()))
    });
    use_future(move || async move {
        platform.set(detect_platform().await);
    });

    use_toaster_provider();

    let screen = use_signal(|| Screen::Wealth);
    let chat_open = use_signal(|| false);
    let mut keys_open = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: REPUBLICA_CSS }
        style { dangerous_inner_html: "{DARK.css()}" }
        div { class: "app-frame",
            AppHeader { screen, on_api_keys: move |_| keys_open.set(true) }
            ScreenPanel { screen }
            ChatButton { open: chat_open }
        }
        ChatPopup { open: chat_open }
        ApiKeyManager { open: keys_open }
        ToastHost {}
    }
}

#[component]
fn AppHeader(screen: Signal<Screen>, on_api_keys: EventHandler<()>) -> Element {
    let mut screen = screen;
    rsx! {
        div { class: "header",
            div { class: "tabs",
                for (tab, label) in TABS {
                    TabButton { key: "{label}", screen, tab, label }
                }
            }
            ProfileMenu {
                on_tax_statement: move |_| screen.set(Screen::TaxStatement),
                on_api_keys,
            }
        }
    }
}

#[component]
fn ScreenPanel(screen: Signal<Screen>) -> Element {
    let mut screen = screen;
    match screen() {
        Screen::ForYou => rsx! { ForYouView {} },
        Screen::Wealth => rsx! { WealthView {} },
        Screen::Cash => rsx! {
            CashView { on_tax_statement: move |_| screen.set(Screen::TaxStatement) }
        },
        Screen::TaxStatement => rsx! {
            TaxStatementView { on_back: move |_| screen.set(Screen::Cash) }
        },
    }
}

#[component]
fn TabButton(screen: Signal<Screen>, tab: Screen, label: &'static str) -> Element {
    let mut screen = screen;
    let class = if screen() == tab { "tab active" } else { "tab" };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| screen.set(tab),
            "{label}"
        }
    }
}
