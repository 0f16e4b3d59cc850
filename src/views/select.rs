use crate::directory::ModelDirectory;
use crate::session::{MemorySessionStore, start_chat};
use crate::types::ModelMetadata;
use crate::ui::AppScreen;
use dioxus::prelude::*;

#[component]
pub fn ModelSelectView(screen: Signal<AppScreen>) -> Element {
    let mut screen = screen;
    let directory = use_context::<ModelDirectory>();
    let store = use_context::<MemorySessionStore>();
    let metadata_url = directory.url().to_string();
    let models = use_resource(move || {
        let directory = directory.clone();
        async move { directory.fetch_models().await }
    });
    let mut selected = use_signal(|| Option::<ModelMetadata>::None);

    let on_start = move |_| {
        let Some(model) = selected() else {
            return;
        };
        match start_chat(&store, &model) {
            Ok(()) => screen.set(AppScreen::Chat),
            Err(err) => tracing::error!(error = %err, "Failed to store selected model"),
        }
    };

    let loaded = models.read().clone();
    let current = selected();

    let models_section = match loaded {
        None => rsx! {
            div { class: "loading",
                div { class: "dots", span {} span {} span {} }
                p { class: "text-muted", "Loading models..." }
            }
        },
        Some(list) => rsx! {
            div { class: "model-grid",
                for model in list.iter() {
                    ModelCard {
                        key: "{model.address}",
                        model: model.clone(),
                        is_selected: current.as_ref() == Some(model),
                        metadata_url: metadata_url.clone(),
                        on_select: move |model: ModelMetadata| selected.set(Some(model)),
                    }
                }
                if list.is_empty() {
                    p { class: "text-muted", "No models found" }
                }
            }
        },
    };

    rsx! {
        div { class: "main-container",
            div { class: "panel",
                h1 { class: "panel-title", "Groq AI Chat - Model Selection" }
                p { class: "text-muted centered",
                    "Select a model to create a custom AI chatbot using its metadata"
                }
                section { class: "models-section",
                    h2 { class: "section-title", "Your AI Models" }
                    {models_section}
                }
                div { class: "start-row",
                    button {
                        class: "btn btn-primary btn-large",
                        r#type: "button",
                        disabled: current.is_none(),
                        onclick: on_start,
                        "Start Chatting with Selected Model"
                    }
                }
            }
        }
    }
}

#[component]
fn ModelCard(
    model: ModelMetadata,
    is_selected: bool,
    metadata_url: String,
    on_select: EventHandler<ModelMetadata>,
) -> Element {
    let class = if is_selected {
        "model-card selected"
    } else {
        "model-card"
    };
    let card_model = model.clone();
    let button_model = model.clone();

    rsx! {
        div { class: class, onclick: move |_| on_select.call(card_model.clone()),
            h3 { class: "model-name", "{model.display_name()}" }
            p { class: "text-muted small", "Address: {model.short_address()}" }
            div { class: "card-actions",
                a {
                    class: "link",
                    href: "{metadata_url}",
                    target: "_blank",
                    onclick: move |ev: MouseEvent| ev.stop_propagation(),
                    "View Metadata"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |ev: MouseEvent| {
                        ev.stop_propagation();
                        on_select.call(button_model.clone());
                    },
                    "Select"
                }
            }
        }
    }
}
