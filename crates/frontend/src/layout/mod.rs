pub mod footer;
pub mod navbar;

use leptos::prelude::*;

use footer::footer::Footer;
use navbar::navbar::Navbar;

/// Navbar on top, page content, footer at the bottom
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-shell">
            <Navbar />
            <main class="app-content">{children()}</main>
            <Footer />
        </div>
    }
}
