use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::system::auth::{api, context::{sign_in, use_auth}};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (display_name, set_display_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let display_name_val = display_name.get();
        let request = RegisterRequest {
            username: username.get(),
            password: password.get(),
            display_name: Some(display_name_val.trim().to_string()).filter(|n| !n.is_empty()),
        };
        let navigate = navigate.clone();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::register(request).await {
                Ok(response) => {
                    sign_in(set_auth_state, response);
                    navigate("/", Default::default());
                }
                Err(e) => set_error_message.set(Some(format!("登録に失敗しました: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"新規登録"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"ユーザー名"</label>
                        <input
                            type="text"
                            id="username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="display_name">"表示名（ランキングに表示）"</label>
                        <input
                            type="text"
                            id="display_name"
                            value=move || display_name.get()
                            on:input=move |ev| set_display_name.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"パスワード（8文字以上）"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "登録中..." } else { "登録する" }}
                    </button>
                </form>

                <p class="login-info">
                    "登録済みの方は "<A href="/login">"ログイン"</A>
                </p>
            </div>
        </div>
    }
}
