//! HTML pages, written as `maud` markup. Anything interpolated with `(...)`
//! is escaped by the macro.

use axum::{http::StatusCode, response::Html};
use maud::{html, Markup, DOCTYPE};

use crate::models::{contact::ContactDto, posts::Post, users::User};

fn layout(title: &str, nav: Markup, flash: Option<&str>, content: Markup) -> Html<String> {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Blog" }
            }
            body {
                (nav)
                @if let Some(message) = flash {
                    p.flash { (message) }
                }
                main { (content) }
            }
        }
    };

    Html(page.into_string())
}

fn site_links() -> Markup {
    html! {
        a href="/" { "Home" }
        " "
        a href="/blog" { "Blog" }
        " "
        a href="/contact" { "Contact" }
    }
}

/// Navigation for a visitor, with the session links matching their login state.
fn nav(viewer: Option<&User>) -> Markup {
    html! {
        nav {
            (site_links())
            " "
            @if let Some(user) = viewer {
                a href="/create" { "New post" }
                " "
                span.user { (user.username) }
                " "
                a href="/logout" { "Logout" }
            } @else {
                a href="/login" { "Login" }
            }
        }
    }
}

fn page(title: &str, viewer: Option<&User>, flash: Option<&str>, content: Markup) -> Html<String> {
    layout(title, nav(viewer), flash, content)
}

pub fn index(viewer: Option<&User>) -> Html<String> {
    page(
        "Home",
        viewer,
        None,
        html! {
            h1 { "Welcome" }
            p { "Notes, photos and the occasional long read." }
            p {
                a href="/blog" { "Read the blog" }
                " or "
                a href="/contact" { "get in touch" }
                "."
            }
        },
    )
}

fn post_card(post: &Post, editable: bool) -> Markup {
    html! {
        article id={ "post-" (post.id) } {
            h2 { (post.title) }
            time { (post.create_at) }
            @if let Some(url) = post.image_url() {
                img src=(url) alt=(post.title);
            }
            p { (post.body) }
            @if editable {
                a href={ "/" (post.id) "/update" } { "Edit" }
                " "
                a href={ "/" (post.id) "/delete" } { "Delete" }
            }
        }
    }
}

pub fn blog(posts: &[Post], viewer: Option<&User>) -> Html<String> {
    page(
        "Blog",
        viewer,
        None,
        html! {
            h1 { "Blog" }
            @for post in posts {
                (post_card(post, viewer.is_some()))
            }
            @if posts.is_empty() {
                p { "No posts yet." }
            }
        },
    )
}

pub fn create(viewer: &User, flash: Option<&str>) -> Html<String> {
    page(
        "New post",
        Some(viewer),
        flash,
        html! {
            h1 { "New post" }
            form action="/create" method="post" enctype="multipart/form-data" {
                label { "Title " input type="text" name="title" maxlength="50" required; }
                label { "Body " textarea name="body" maxlength="300" required {} }
                label { "Image " input type="file" name="file"; }
                button type="submit" { "Publish" }
            }
        },
    )
}

pub fn update(post: &Post, viewer: &User, flash: Option<&str>) -> Html<String> {
    page(
        "Edit post",
        Some(viewer),
        flash,
        html! {
            h1 { "Edit post" }
            form action={ "/" (post.id) "/update" } method="post" {
                label {
                    "Title "
                    input type="text" name="title" maxlength="50" value=(post.title) required;
                }
                label { "Body " textarea name="body" maxlength="300" required { (post.body) } }
                button type="submit" { "Save" }
            }
        },
    )
}

pub fn login(viewer: Option<&User>, flash: Option<&str>) -> Html<String> {
    page(
        "Login",
        viewer,
        flash,
        html! {
            h1 { "Login" }
            form action="/login" method="post" {
                label { "Username " input type="text" name="username" required; }
                label { "Password " input type="password" name="password" required; }
                button type="submit" { "Log in" }
            }
        },
    )
}

pub fn signup(viewer: Option<&User>, flash: Option<&str>) -> Html<String> {
    page(
        "Sign up",
        viewer,
        flash,
        html! {
            h1 { "Sign up" }
            form action="/signup" method="post" {
                label { "Username " input type="text" name="username" maxlength="30" required; }
                label { "Password " input type="password" name="password" required; }
                button type="submit" { "Create account" }
            }
        },
    )
}

pub fn contact(viewer: Option<&User>) -> Html<String> {
    page(
        "Contact",
        viewer,
        None,
        html! {
            h1 { "Contact" }
            form action="/contact" method="post" {
                label { "Name " input type="text" name="name" required; }
                label { "Email " input type="email" name="email" required; }
                label { "Message " textarea name="message" required {} }
                button type="submit" { "Review" }
            }
        },
    )
}

pub fn contact_confirm(contact: &ContactDto, viewer: Option<&User>) -> Html<String> {
    page(
        "Confirm",
        viewer,
        None,
        html! {
            h1 { "Please confirm" }
            dl {
                dt { "Name" } dd.name { (contact.name) }
                dt { "Email" } dd.email { (contact.email) }
                dt { "Message" } dd.message { (contact.message) }
            }
            form action="/go" method="post" {
                input type="hidden" name="name" value=(contact.name);
                input type="hidden" name="email" value=(contact.email);
                input type="hidden" name="message" value=(contact.message);
                button type="submit" { "Send" }
            }
            a href="/contact" { "Back" }
        },
    )
}

/// Shown after `/go` whatever the mail relay said; delivery is best effort.
pub fn sent(contact: &ContactDto, viewer: Option<&User>) -> Html<String> {
    page(
        "Sent",
        viewer,
        None,
        html! {
            h1 { "Thank you, " (contact.name) }
            p { "We received your message and will reply to " (contact.email) "." }
            a href="/" { "Back to the start page" }
        },
    )
}

/// Error pages are rendered outside any handler, so they only carry the public links.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    layout(
        "Error",
        html! { nav { (site_links()) } },
        None,
        html! {
            h1 { (status.to_string()) }
            p { (message) }
            a href="/" { "Back to the start page" }
        },
    )
}
