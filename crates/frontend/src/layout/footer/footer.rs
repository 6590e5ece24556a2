use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_url;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);

    Effect::new(move |_| {
        spawn_local(async move {
            let online = match Request::get(&api_url("/health")).send().await {
                Ok(response) => response.ok(),
                Err(_) => false,
            };
            status.set(if online {
                ServerStatus::Online
            } else {
                ServerStatus::Offline
            });
        });
    });

    view! {
        <footer class="footer">
            <p class="footer-text">"© 2025 Near Gourmet 2 | All Rights Reserved"</p>
            <span class=move || status.get().css_class() title="server"></span>
        </footer>
    }
}
