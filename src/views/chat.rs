use crate::ai::Assistant;
use crate::session::{ChatSession, DisplayMessage, MessageKind, QUICK_QUESTIONS, TurnKind};
use crate::views::shared::{StockChart, markdown_to_html, use_toaster};
use crate::views::voice_bridge::{Recorder, RecorderStop, play_speech, stop_speech};
use crate::voice::{PlatformCapabilities, PlaybackState, VoiceError, VoiceService};
use dioxus::events::Key;
use dioxus::prelude::*;
use tracing::{debug, info, warn};

#[component]
pub fn ChatButton(open: Signal<bool>) -> Element {
    let mut open = open;
    rsx! {
        button {
            class: "chat-fab",
            r#type: "button",
            title: "Ask Republica",
            onclick: move |_| open.set(true),
            "💬"
        }
    }
}

#[component]
pub fn ChatPopup(open: Signal<bool>) -> Element {
    let mut open = open;
    let assistant = use_context::<Assistant>();
    let voice = use_context::<VoiceService>();
    let platform = use_context::<Signal<PlatformCapabilities>>();
    let toaster = use_toaster();

    let mut session = use_signal(ChatSession::new);
    let mut input = use_signal(String::new);
    let mut recorder_stop = use_signal(|| Option::<RecorderStop>::None);
    let playback = use_signal(PlaybackState::new);

    // the transcript lives only as long as the dialog is open
    use_effect(move || {
        if open() {
            session.write().open();
        } else if session.peek().open {
            let pending = recorder_stop.write().take();
            if let Some(stop) = pending {
                stop.stop();
            }
            stop_speech(playback);
            session.write().close();
        }
    });

    let send_message = {
        let assistant = assistant.clone();
        move |text: String| {
            let Some(message) = session.write().begin_turn(&text) else {
                return;
            };
            input.set(String::new());

            let epoch = session.peek().epoch();
            let assistant = assistant.clone();
            spawn(async move {
                let reply = assistant.send_chat(&message).await;
                info!(source = ?reply.source, chart = reply.show_chart, "chat turn finished");
                if session.peek().is_current(epoch) {
                    session.write().finish_turn(&reply);
                }
            });
        }
    };

    let start_voice_turn = {
        let assistant = assistant.clone();
        let voice = voice.clone();
        move || {
            if !session.peek().can_send() {
                return;
            }
            let assistant = assistant.clone();
            let voice = voice.clone();
            let caps = platform.peek().clone();
            let epoch = session.peek().epoch();
            spawn(async move {
                let recorder = match Recorder::start(&caps).await {
                    Ok(recorder) => recorder,
                    Err(err) => {
                        warn!(error = %err, "could not start recording");
                        toaster.show(err.toast());
                        return;
                    }
                };
                if !session.peek().is_current(epoch) {
                    recorder.stopper().stop();
                    recorder.collect().await;
                    return;
                }
                recorder_stop.set(Some(recorder.stopper()));
                session.write().recording = true;

                let recording = recorder.collect().await;
                if !session.peek().is_current(epoch) {
                    debug!("dialog closed while recording, dropping audio");
                    return;
                }
                recorder_stop.set(None);
                session.write().recording = false;

                let transcript = match voice.transcribe(recording).await {
                    Ok(text) => text,
                    Err(err) => {
                        if !session.peek().is_current(epoch) {
                            return;
                        }
                        if matches!(err, VoiceError::Transcription(_) | VoiceError::Http(_)) {
                            session.write().fail_turn(TurnKind::Voice);
                        }
                        toaster.show(err.toast());
                        return;
                    }
                };

                if !session.peek().is_current(epoch) {
                    return;
                }
                let Some(message) = session.write().begin_turn(&transcript) else {
                    return;
                };
                let reply = assistant.send_voice(&message).await;
                if !session.peek().is_current(epoch) {
                    return;
                }
                session.write().finish_turn(&reply);

                match voice.synthesize(&reply.text).await {
                    Ok(audio) if session.peek().is_current(epoch) => play_speech(audio, playback).await,
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "spoken reply unavailable");
                        toaster.show(err.toast());
                    }
                }
            });
        }
    };

    if !open() {
        return rsx! {};
    }

    let snapshot = session();
    let busy = !snapshot.can_send();

    rsx! {
        div { class: "dialog-backdrop", onclick: move |_| open.set(false),
            div { class: "dialog chat-dialog", onclick: move |ev| ev.stop_propagation(),
                div { class: "chat-header",
                    div { class: "avatar", "RP" }
                    div { class: "chat-header-text",
                        h3 { "Republica" }
                        p { class: "text-muted", "Financial Assistant" }
                    }
                    button {
                        class: "btn btn-ghost close-btn",
                        r#type: "button",
                        onclick: move |_| open.set(false),
                        "✕"
                    }
                }

                div { class: "chat-list",
                    for (i, msg) in snapshot.transcript.messages().iter().enumerate() {
                        MessageRow { key: "{i}", message: msg.clone() }
                    }
                    if snapshot.loading {
                        div { class: "message-row assistant",
                            div { class: "bubble assistant typing",
                                span { class: "dot" }
                                span { class: "dot" }
                                span { class: "dot" }
                            }
                        }
                    }
                }

                div { class: "quick-questions",
                    for question in QUICK_QUESTIONS {
                        button {
                            class: "quick-question",
                            r#type: "button",
                            disabled: busy,
                            onclick: {
                                let mut send_message = send_message.clone();
                                move |_| send_message(question.to_string())
                            },
                            "{question}"
                        }
                    }
                }

                form { class: "composer",
                    onsubmit: {
                        let mut send_message = send_message.clone();
                        move |ev: FormEvent| {
                            ev.prevent_default();
                            send_message(input());
                        }
                    },
                    if playback().is_playing() {
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            title: "Stop audio",
                            onclick: move |_| stop_speech(playback),
                            "🔇"
                        }
                    }
                    input {
                        r#type: "text",
                        placeholder: if snapshot.recording { "Listening..." } else { "Type your message..." },
                        value: "{input}",
                        disabled: busy,
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: {
                            let mut send_message = send_message.clone();
                            move |ev: KeyboardEvent| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send_message(input());
                                }
                            }
                        },
                    }
                    button {
                        class: if snapshot.recording { "btn mic recording" } else { "btn mic" },
                        r#type: "button",
                        title: if snapshot.recording { "Stop recording" } else { "Speak" },
                        disabled: snapshot.loading,
                        onclick: {
                            let mut start_voice_turn = start_voice_turn.clone();
                            move |ev: MouseEvent| {
                                ev.stop_propagation();
                                match recorder_stop() {
                                    Some(stop) => stop.stop(),
                                    None => start_voice_turn(),
                                }
                            }
                        },
                        if snapshot.recording { "⏹" } else { "🎤" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy || input().trim().is_empty(),
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: DisplayMessage) -> Element {
    if message.kind == MessageKind::StockChart {
        return rsx! {
            div { class: "message-row assistant chart-row", StockChart {} }
        };
    }

    let side = if message.is_user { "user" } else { "assistant" };
    rsx! {
        div { class: "message-row {side}",
            div { class: "bubble {side}",
                if message.is_user {
                    "{message.text}"
                } else {
                    AssistantBubble { content: message.text.clone() }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            {
                let script = format!(
                    "navigator.clipboard && navigator.clipboard.writeText({});",
                    serde_json::json!(raw)
                );
                let _ = document::eval(&script);
            }
        });
    };

    rsx! {
        div { class: "md", dangerous_inner_html: "{content_html}" }
        div { class: "bubble-controls",
            button { class: "action-btn", title: "Copy", onclick: on_copy, "Copy" }
        }
    }
}
