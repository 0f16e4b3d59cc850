use crate::ai::RelayClient;
use crate::directory::ModelDirectory;
use crate::session::MemorySessionStore;
use crate::theme::APP_CSS;
use crate::views::{ChatView, ModelSelectView};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Select,
    Chat,
}

#[component]
pub fn App() -> Element {
    use_context_provider(MemorySessionStore::new);
    use_context_provider(ModelDirectory::from_env);
    use_context_provider(RelayClient::from_env);
    let screen = use_signal(|| AppScreen::Select);

    rsx! {
        style { dangerous_inner_html: "{APP_CSS}" }
        div { class: "app-shell",
            if screen() == AppScreen::Chat {
                ChatView { screen }
            } else {
                ModelSelectView { screen }
            }
        }
    }
}
