// Reusable components live here.

pub mod article_card;
pub mod article_view;
pub mod author_avatar;
pub mod category_section;
pub mod featured_article;
pub mod footer;
pub mod form_field;
pub mod image_with_loading;
pub mod loading_spinner;
pub mod navbar;
pub mod raw_html;
pub mod reading_progress_bar;
pub mod search_bar;
pub mod toast;
pub mod user_menu;
