pub mod ranking_page;
