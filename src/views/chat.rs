use crate::ai::RelayClient;
use crate::conversation::Conversation;
use crate::session::{MemorySessionStore, end_session, load_session};
use crate::types::{ChatMessage, ModelMetadata, Role, Visibility};
use crate::ui::AppScreen;
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{UtcOffset, format_description::FormatItem, macros::format_description};

const CREATED_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:zero], [year]");

fn created_label(metadata: &ModelMetadata) -> Option<String> {
    let mut created = metadata.created_at?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        created = created.to_offset(offset);
    }
    created.format(CREATED_DATE_FORMAT).ok()
}

fn visibility_label(metadata: &ModelMetadata) -> &'static str {
    match metadata.visibility.unwrap_or_default() {
        Visibility::Private => "Private Model",
        Visibility::Public => "Public Model",
    }
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant | Role::System => "assistant",
    }
}

#[component]
pub fn ChatView(screen: Signal<AppScreen>) -> Element {
    let mut screen = screen;
    let store = use_context::<MemorySessionStore>();
    let relay_client = use_context::<RelayClient>();
    let relay = use_signal(move || relay_client);
    let mut input = use_signal(String::new);
    let session_store = store.clone();
    let mut conversation = use_signal(move || match load_session(&session_store) {
        Ok(session) => Some(Conversation::new(session)),
        Err(err) => {
            tracing::info!(error = %err, "No usable chat session, back to model selection");
            None
        }
    });

    use_effect(move || {
        if conversation.read().is_none() {
            screen.set(AppScreen::Select);
        }
    });

    let mut send_message = move |text: String| {
        let submitted = conversation.with_mut(|state| state.as_mut().map(|c| c.submit(&text)));
        let request = match submitted {
            Some(Ok(request)) => request,
            Some(Err(err)) => {
                tracing::debug!(error = %err, "Submission ignored");
                return;
            }
            None => return,
        };
        input.set(String::new());

        spawn(async move {
            let outcome = relay().send(&request).await;
            conversation.with_mut(|state| {
                if let Some(c) = state.as_mut()
                    && let Err(err) = c.resolve(outcome)
                {
                    tracing::warn!(error = %err, "Dropped relay outcome");
                }
            });
        });
    };

    let on_end = move |_| {
        if let Err(err) = end_session(&store) {
            tracing::error!(error = %err, "Failed to clear chat session");
        }
        screen.set(AppScreen::Select);
    };

    let Some(state) = conversation() else {
        return rsx! {
            div { class: "main-container centered",
                h2 { class: "section-title", "Loading your AI twin..." }
            }
        };
    };

    let metadata = state.metadata().clone();
    let awaiting = state.is_awaiting();
    let messages: Vec<ChatMessage> = state.display().cloned().collect();

    rsx! {
        div { class: "chat-header",
            div { class: "chat-header-inner",
                div {
                    h1 { class: "chat-title", "{metadata.role}" }
                    p { class: "chat-subtitle", "Based on: {metadata.text_sample}" }
                    p { class: "chat-meta",
                        "{visibility_label(&metadata)}"
                        if let Some(created) = created_label(&metadata) {
                            " • Created: {created}"
                        }
                    }
                }
                div { class: "header-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| screen.set(AppScreen::Select),
                        "Change Model"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: on_end,
                        "End Chat"
                    }
                }
            }
        }

        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for (i, msg) in messages.iter().enumerate() {
                        div { key: "{i}", class: format_args!("message-row {}", role_class(msg.role)),
                            div { class: format_args!("bubble {}", role_class(msg.role)),
                                if msg.role == Role::User {
                                    "{msg.content}"
                                } else {
                                    AssistantBubble { content: msg.content.clone() }
                                }
                            }
                        }
                    }
                    if awaiting {
                        div { class: "message-row assistant",
                            div { class: "bubble assistant",
                                div { class: "dots", span {} span {} span {} }
                            }
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    input {
                        r#type: "text",
                        placeholder: "Type your message...",
                        value: "{input}",
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter {
                                ev.prevent_default();
                                send_message(input());
                            }
                        },
                        disabled: awaiting,
                        autofocus: true,
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: awaiting || input().trim().is_empty(),
                        onclick: move |_| send_message(input()),
                        if awaiting { "Sending..." } else { "Send" }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    #[cfg(any(feature = "desktop", feature = "mobile"))]
    let copy_payload = content.clone();

    rsx! {
        div { class: "md", dangerous_inner_html: "{content_html}" }
        if cfg!(any(feature = "desktop", feature = "mobile")) {
            div { class: "bubble-controls",
                button {
                    class: "action-btn",
                    title: "Copy message",
                    onclick: move |_| {
                        #[cfg(any(feature = "desktop", feature = "mobile"))]
                        crate::views::shared::copy_to_clipboard(copy_payload.clone());
                    },
                    "Copy"
                }
            }
        }
    }
}
