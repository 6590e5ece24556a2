use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_info.as_ref().map(|u| u.id.clone())
    }
}

/// Auth context provider component.
/// Restores the session from localStorage on mount, refreshing the access token once if needed.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(state) = restore_session().await {
                set_auth_state.set(state);
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;

    if let Ok(user_info) = api::get_current_user().await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(user_info),
        });
    }

    let refreshed = match storage::get_refresh_token() {
        Some(refresh_token) => api::refresh_token(refresh_token).await.ok(),
        None => None,
    };
    let Some(refreshed) = refreshed else {
        log::info!("Stored session expired");
        storage::clear_tokens();
        return None;
    };

    storage::save_access_token(&refreshed.access_token);
    let user_info = api::get_current_user().await.ok()?;
    Some(AuthState {
        access_token: Some(refreshed.access_token),
        user_info: Some(user_info),
    })
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Store the tokens of a successful login / registration and publish the user
pub fn sign_in(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_tokens(&response.access_token, &response.refresh_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
}

/// Revoke the refresh token and forget the session
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    let refresh_token = storage::get_refresh_token();
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());

    if let Some(refresh_token) = refresh_token {
        spawn_local(async move {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("{}", e);
            }
        });
    }
}
