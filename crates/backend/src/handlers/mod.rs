pub mod a001_shop;
pub mod a002_visit;
pub mod a003_bookmark;
pub mod a004_user_profile;
pub mod d400_monthly_ranking;
