pub mod my_page;
pub mod profile_edit;
