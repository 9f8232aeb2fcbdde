use super::super::{App, Msg, Page};
use yew::html::Scope;
use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-fish"></i>{" IkanCheck"}</h1>
            <p class="subtitle">{"Fish disease detection from a single photo"}</p>
        </header>
    }
}

pub fn render_nav(current: Page, link: &Scope<App>) -> Html {
    html! {
        <nav class="app-nav">
            { for Page::ALL.into_iter().map(|page| html! {
                <button
                    class={classes!("nav-btn", (page == current).then_some("active"))}
                    onclick={link.callback(move |_| Msg::Navigate(page))}
                >
                    <i class={page.icon()}></i>{ format!(" {}", page.title()) }
                </button>
            })}
        </nav>
    }
}
