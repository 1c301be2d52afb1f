use crate::ai::Assistant;
use crate::credentials::Vendor;
use crate::types::Toast;
use crate::views::shared::use_toaster;
use dioxus::prelude::*;
use tracing::warn;

#[derive(Clone, Copy, PartialEq, Eq)]
enum KeyTab {
    Mistral,
    OpenAi,
}

#[component]
pub fn ProfileMenu(on_tax_statement: EventHandler<()>, on_api_keys: EventHandler<()>) -> Element {
    let mut expanded = use_signal(|| false);

    rsx! {
        div { class: "profile-menu",
            button {
                class: "profile-btn",
                r#type: "button",
                title: "Profile Settings",
                onclick: move |_| expanded.toggle(),
                "👤"
            }
            if expanded() {
                div { class: "dropdown",
                    div { class: "dropdown-label", "Profile Settings" }
                    button {
                        class: "dropdown-item",
                        r#type: "button",
                        onclick: move |_| {
                            expanded.set(false);
                            on_tax_statement.call(());
                        },
                        "Tax Statement"
                    }
                    button {
                        class: "dropdown-item",
                        r#type: "button",
                        onclick: move |_| {
                            expanded.set(false);
                            on_api_keys.call(());
                        },
                        "AI Model API Keys"
                    }
                }
            }
        }
    }
}

fn toast_name(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::Mistral => "Mistral",
        Vendor::OpenAi => "OpenAI",
    }
}

fn saved_toast(vendor: Vendor) -> Toast {
    let name = toast_name(vendor);
    Toast::new(
        format!("{name} API Key Saved"),
        format!("Your {name} API key has been saved successfully."),
    )
}

fn failed_toast(vendor: Vendor) -> Toast {
    Toast::new(
        format!("Error Saving {} API Key", toast_name(vendor)),
        "There was a problem saving your API key. Please try again.",
    )
}

/// Dialog for entering the Mistral and OpenAI keys.
#[component]
pub fn ApiKeyManager(open: Signal<bool>) -> Element {
    let mut open = open;
    let assistant = use_context::<Assistant>();
    let toaster = use_toaster();

    let mut tab = use_signal(|| KeyTab::Mistral);
    let mut mistral_key = use_signal(String::new);
    let mut openai_key = use_signal(String::new);

    // Prefill with whatever currently resolves each time the dialog opens.
    let credentials = assistant.credentials().clone();
    use_resource(move || {
        let credentials = credentials.clone();
        async move {
            if !open() {
                return;
            }
            let keys = credentials.resolve().await;
            mistral_key.set(keys.mistral);
            openai_key.set(keys.openai);
        }
    });

    let save_all = {
        let credentials = assistant.credentials().clone();
        move |_| {
            let credentials = credentials.clone();
            let entries = [
                (Vendor::OpenAi, openai_key.peek().clone()),
                (Vendor::Mistral, mistral_key.peek().clone()),
            ];
            open.set(false);
            spawn(async move {
                for (vendor, key) in entries {
                    match credentials.save(vendor, &key).await {
                        Ok(()) => toaster.show(saved_toast(vendor)),
                        Err(err) => {
                            warn!(%vendor, error = %err, "saving api key failed");
                            toaster.show(failed_toast(vendor));
                        }
                    }
                }
            });
        }
    };

    if !open() {
        return rsx! {};
    }

    rsx! {
        div { class: "dialog-backdrop", onclick: move |_| open.set(false),
            div { class: "dialog key-dialog", onclick: move |ev| ev.stop_propagation(),
                h3 { "AI Model API Keys" }
                p { class: "text-muted",
                    "Enter your API keys to enable the chat functionality. Keys will be stored in your secrets database."
                }
                div { class: "tab-list",
                    button {
                        class: if tab() == KeyTab::Mistral { "tab active" } else { "tab" },
                        r#type: "button",
                        onclick: move |_| tab.set(KeyTab::Mistral),
                        "Mistral AI"
                    }
                    button {
                        class: if tab() == KeyTab::OpenAi { "tab active" } else { "tab" },
                        r#type: "button",
                        onclick: move |_| tab.set(KeyTab::OpenAi),
                        "OpenAI"
                    }
                }
                match tab() {
                    KeyTab::Mistral => rsx! {
                        div { class: "key-field",
                            p { class: "text-muted", "Enter your Mistral AI API key for primary chat functionality." }
                            input {
                                r#type: "text",
                                placeholder: "Enter Mistral API key...",
                                value: "{mistral_key}",
                                oninput: move |ev| mistral_key.set(ev.value()),
                            }
                        }
                    },
                    KeyTab::OpenAi => rsx! {
                        div { class: "key-field",
                            p { class: "text-muted", "Enter your OpenAI API key for backup chat functionality." }
                            input {
                                r#type: "text",
                                placeholder: "Enter OpenAI API key (sk-...)...",
                                value: "{openai_key}",
                                oninput: move |ev| openai_key.set(ev.value()),
                            }
                        }
                    },
                }
                button { class: "btn btn-primary", r#type: "button", onclick: save_all, "Save Keys" }
            }
        }
    }
}
