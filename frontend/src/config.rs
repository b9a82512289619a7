//! Build-time configuration for the frontend application.

/// Project URL of the hosted backend.
/// - Set at build time: `SUPABASE_URL=https://xyz.supabase.co trunk build`
/// - Local development: a `supabase start` instance
pub const SUPABASE_URL: &str = match option_env!("SUPABASE_URL") {
    Some(url) => url,
    None => "http://localhost:54321",
};

/// Public anon key sent as `apikey` on every request.
pub const SUPABASE_ANON_KEY: &str = match option_env!("SUPABASE_ANON_KEY") {
    Some(key) => key,
    None => "",
};

/// Public origin used for canonical and share URLs when the page has none.
pub const SITE_URL: &str = match option_env!("TIMES_ROMAN_SITE_URL") {
    Some(url) => url,
    None => "https://timesroman.app",
};

/// Log level filter: `trace`, `debug`, `info`, `warn` or `error`.
pub const LOG_LEVEL: &str = match option_env!("TIMES_ROMAN_LOG") {
    Some(level) => level,
    None => "info",
};

/// localStorage key of the persisted auth session.
pub const SESSION_STORAGE_KEY: &str = "times-roman.auth.session";

pub fn rest_url(table: &str, query_string: &str) -> String {
    let base = format!("{}/rest/v1/{}", SUPABASE_URL.trim_end_matches('/'), table);
    if query_string.is_empty() {
        base
    } else {
        format!("{}?{}", base, query_string)
    }
}

pub fn auth_url(path: &str) -> String {
    format!("{}/auth/v1/{}", SUPABASE_URL.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Origin of the running page, falling back to [`SITE_URL`].
pub fn current_origin() -> String {
    web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .filter(|origin| !origin.is_empty() && origin != "null")
        .unwrap_or_else(|| SITE_URL.trim_end_matches('/').to_string())
}

/// Absolute URL for a site path.
pub fn site_url(path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", current_origin(), path)
}
