pub mod loading_spinner {
    pub const ARIA_LABEL: &str = "Loading";
}

pub mod toast {
    pub const CLOSE_ARIA: &str = "Dismiss notification";
}

pub mod auth {
    pub const SIGNED_IN: &str = "Successfully signed in!";
    pub const SIGN_IN_FAILED: &str = "Sign in failed";
    pub const CHECK_EMAIL: &str = "Check your email";
    pub const CHECK_EMAIL_DETAIL: &str = "We sent you a confirmation link to finish signing up.";
    pub const SIGNED_UP: &str = "Account created!";
    pub const SIGN_UP_FAILED: &str = "Sign up failed";
    pub const GOOGLE_REDIRECT_FAILED: &str = "Could not open the Google sign-in page.";
    pub const SIGNED_OUT: &str = "Successfully signed out";
    pub const SIGN_OUT_FAILED: &str = "Sign out failed";
}

pub mod navbar {
    pub const BRAND_NAME: &str = "Times Roman";
    pub const NAV_MAIN_ARIA: &str = "Main navigation";
    pub const OPEN_MENU_ARIA: &str = "Open menu";
    pub const CLOSE_MENU_ARIA: &str = "Close menu";
}

pub mod search_bar {
    pub const OPEN_LABEL: &str = "Search articles";
    pub const DIALOG_TITLE: &str = "Search Times Roman";
    pub const CLOSE_ARIA: &str = "Close search";
    pub const PLACEHOLDER: &str = "Search for articles...";
    pub const SUBMIT: &str = "Search";
}

pub mod user_menu {
    pub const SIGN_IN: &str = "Sign In";
    pub const SIGNED_IN_AS: &str = "Signed in as";
    pub const PROFILE: &str = "Profile";
    pub const SIGN_OUT: &str = "Sign out";
}

pub mod footer {
    pub const BRAND_NAME: &str = "Times Roman";
    pub const TAGLINE: &str = "The next-generation AI-powered news platform.";
    pub const CATEGORIES: &str = "Categories";
    pub const READERS: &str = "Readers";
    pub const SEARCH: &str = "Search";
    pub const PROFILE: &str = "Your Profile";
    pub const COPYRIGHT_TEMPLATE: &str = "© {} Times Roman. All rights reserved.";
}

pub mod article_card {
    pub const READ_TIME_TEMPLATE: &str = "{} read";
    pub const VIEWS_TEMPLATE: &str = "{} views";
}

pub mod category_section {
    pub const VIEW_ALL: &str = "View All";
    pub const EMPTY: &str = "No articles in this category yet.";
}

pub mod home {
    pub const LATEST_HEADING: &str = "Latest News";
}

pub mod category_page {
    pub const FILTER: &str = "Filter";
    pub const SORT_BY: &str = "Sort by:";
    pub const SHOWING_TEMPLATE: &str = "Showing {} of {} articles";
    pub const LOAD_MORE: &str = "Load More Articles";
    pub const EMPTY_HEADING: &str = "No articles found";
    pub const EMPTY_DESCRIPTION: &str = "There are no articles in this category yet.";
}

pub mod search_page {
    pub const TITLE: &str = "Search";
    pub const RESULTS_TEMPLATE: &str = "Search results for \"{}\"";
    pub const PROMPT: &str = "Type a keyword in the search bar to find articles.";
    pub const NO_RESULTS_TEMPLATE: &str = "No results found for \"{}\"";
    pub const NO_RESULTS_HINT: &str = "Try different keywords or browse our categories";
}

pub mod article_page {
    pub const LOADING_TITLE: &str = "Loading Article";
    pub const LOADING: &str = "Loading article...";
    pub const NOT_FOUND_TITLE: &str = "Article Not Found";
    pub const NOT_FOUND_HEADING: &str = "Article not found";
    pub const NOT_FOUND_DESCRIPTION: &str =
        "The article you're looking for doesn't exist or has been removed.";
    pub const BACK_HOME: &str = "Back to Homepage";
    pub const RELATED_HEADING: &str = "Related Articles";
    pub const NO_RELATED: &str = "No related articles found.";
}

pub mod article {
    pub const READ_TIME_RANGE_TEMPLATE: &str = "{} read";
    pub const VIEWS_TEMPLATE: &str = "{} views";
    pub const SHARE: &str = "Share";
    pub const SHARE_ARIA: &str = "Share article";
    pub const SHARE_TEXT: &str = "Check out this article on Times Roman";
    pub const SHARE_FAILED: &str = "Error sharing article";
    pub const LINK_COPIED: &str = "Link copied to clipboard!";
    pub const SAVE: &str = "Save";
    pub const SAVED: &str = "Saved";
    pub const SAVE_ARIA: &str = "Save article";
    pub const REMOVE_BOOKMARK_ARIA: &str = "Remove bookmark";
    pub const LIKE: &str = "Like";
    pub const LIKED: &str = "Liked";
    pub const LIKE_ARIA: &str = "Like article";
    pub const REMOVE_LIKE_ARIA: &str = "Remove like";
    pub const FEATURED_IMAGE_ALT_TEMPLATE: &str = "Featured image for {}";
    pub const ABOUT_AUTHOR: &str = "About the Author";
    pub const AUTHOR_PHOTO_ALT_TEMPLATE: &str = "Photo of {}";
    pub const NEWS_TAG: &str = "#News";
    pub const NEWS_TAG_QUERY: &str = "news";
    pub const SITE_TAG: &str = "#TimesRoman";
    pub const IMAGE_ALT_TEMPLATE: &str = "Image related to {}";
    pub const EMPTY_LINK_ARIA: &str = "Related article link";
}

pub mod auth_page {
    pub const SIGN_IN_TITLE: &str = "Sign In";
    pub const SIGN_UP_TITLE: &str = "Create Account";
    pub const WELCOME_BACK: &str = "Welcome Back";
    pub const SIGN_IN_SUBTITLE: &str = "Sign in to access your account";
    pub const SIGN_UP_SUBTITLE: &str = "Join Times Roman to access exclusive content";
    pub const GOOGLE_SIGN_IN: &str = "Sign In with Google";
    pub const GOOGLE_SIGN_UP: &str = "Sign Up with Google";
    pub const OR: &str = "OR";
    pub const EMAIL: &str = "Email";
    pub const EMAIL_PLACEHOLDER: &str = "your.email@example.com";
    pub const PASSWORD: &str = "Password";
    pub const PASSWORD_PLACEHOLDER: &str = "••••••••";
    pub const CONFIRM_PASSWORD: &str = "Confirm Password";
    pub const SIGN_IN: &str = "Sign In";
    pub const SIGNING_IN: &str = "Signing in...";
    pub const CREATE_ACCOUNT: &str = "Create Account";
    pub const CREATING_ACCOUNT: &str = "Creating Account...";
    pub const TO_SIGN_UP: &str = "Don't have an account? Sign Up";
    pub const TO_SIGN_IN: &str = "Already have an account? Sign In";
}

pub mod auth_callback {
    pub const TITLE: &str = "Signing In";
    pub const MESSAGE: &str = "Completing sign in, please wait...";
}

pub mod profile_page {
    pub const TITLE: &str = "Your Profile";
    pub const HEADING: &str = "Your Profile";
    pub const USERNAME: &str = "Username";
    pub const USERNAME_PLACEHOLDER: &str = "Your username";
    pub const AVATAR_URL: &str = "Avatar URL";
    pub const AVATAR_PLACEHOLDER: &str = "https://example.com/avatar.jpg";
    pub const UPDATE: &str = "Update Profile";
    pub const UPDATING: &str = "Updating...";
    pub const SAVED: &str = "Profile updated successfully!";
    pub const LOAD_FAILED: &str = "Error fetching profile";
    pub const SAVE_FAILED: &str = "Error updating profile";
    pub const SAVE_FAILED_DETAIL: &str = "Error updating profile: {}";
}

pub mod not_found {
    pub const TITLE: &str = "Page Not Found";
    pub const HEADING: &str = "404";
    pub const MESSAGE: &str = "Sorry, the page you are looking for does not exist.";
    pub const BACK_HOME: &str = "Back to Homepage";
}
