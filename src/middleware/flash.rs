use tower_cookies::{Cookie, Cookies};

pub const FLASH_COOKIE: &str = "flash";

/// Stores a one-shot message to be shown by the next rendered form.
pub fn set_flash(cookies: &Cookies, message: &str) {
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Reads the pending message, if any, and clears it.
pub fn take_flash(cookies: &Cookies) -> Option<String> {
    let value = cookies.get(FLASH_COOKIE)?.value().to_string();
    cookies.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());

    urlencoding::decode(&value)
        .ok()
        .map(|message| message.into_owned())
        .filter(|message| !message.is_empty())
}
