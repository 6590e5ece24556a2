pub mod admin_form;
pub mod home;
pub mod shop_card;
pub mod shop_list;
