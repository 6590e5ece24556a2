use contracts::domain::a004_user_profile::UpdateProfileDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::domain::a004_user_profile::api;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAuth;

/// `/profile-edit`: change the name shown on the ranking
#[component]
pub fn ProfileEditPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <ProfileEditForm />
        </RequireAuth>
    }
}

#[component]
fn ProfileEditForm() -> impl IntoView {
    let (display_name, set_display_name) = signal(String::new());
    let (error_message, set_error_message) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_my_profile().await {
                Ok(profile) => set_display_name.set(profile.display_name.unwrap_or_default()),
                Err(e) => log::error!("Failed to load profile: {}", e),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let dto = UpdateProfileDto {
            display_name: display_name.get(),
        };
        if let Err(e) = dto.validate() {
            set_error_message.set(Some(e));
            return;
        }
        let navigate = navigate.clone();
        set_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::update_my_profile(dto.display_name).await {
                Ok(profile) => {
                    set_auth_state.update(|state| {
                        if let Some(user) = state.user_info.as_mut() {
                            user.display_name = profile.display_name;
                        }
                    });
                    navigate("/mypage", Default::default());
                }
                Err(e) => set_error_message.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="profile-edit">
            <h2>"プロフィール編集"</h2>
            <Show when=move || error_message.get().is_some()>
                <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
            </Show>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="display_name">"表示名"</label>
                    <input
                        type="text"
                        id="display_name"
                        maxlength="40"
                        value=move || display_name.get()
                        on:input=move |ev| set_display_name.set(event_target_value(&ev))
                        disabled=move || saving.get()
                    />
                </div>
                <button type="submit" class="btn-primary" disabled=move || saving.get()>
                    "保存"
                </button>
            </form>
        </div>
    }
}
