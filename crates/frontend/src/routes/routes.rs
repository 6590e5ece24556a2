use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::d400_monthly_ranking::ui::ranking_page::MonthlyRankingPage;
use crate::domain::a001_shop::ui::admin_form::AdminFormPage;
use crate::domain::a001_shop::ui::home::HomePage;
use crate::domain::a001_shop::ui::shop_list::{GenrePage, StationPage};
use crate::domain::a004_user_profile::ui::my_page::MyPage;
use crate::domain::a004_user_profile::ui::profile_edit::ProfileEditPage;
use crate::layout::Shell;
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <p>"ページが見つかりません。"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/home") view=HomePage />
                    <Route path=path!("/genre/:genre") view=GenrePage />
                    <Route path=path!("/station/:station") view=StationPage />
                    <Route path=path!("/ranking") view=MonthlyRankingPage />
                    <Route path=path!("/mypage") view=MyPage />
                    <Route path=path!("/profile-edit") view=ProfileEditPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/admin") view=AdminFormPage />
                </Routes>
            </Shell>
        </Router>
    }
}
