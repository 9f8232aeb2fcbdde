use super::super::{App, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(app: &App, ctx: &Context<App>) -> Html {
    let Some(selected) = &app.selected else {
        return html! {
            <div class="preview-empty">
                <p>{"No photo selected yet."}</p>
            </div>
        };
    };

    let link = ctx.link().clone();
    let file_name = selected.file.name();

    html! {
        <div id="preview-container">
            <img id="actual-image-preview"
                src={selected.preview_url.to_string()}
                alt={file_name.clone()}
                title={file_name.clone()}
            />
            <p class="preview-caption">{ file_name }</p>
            <div class="button-container">
                <button
                    class="analyze-btn clear-btn"
                    disabled={app.loading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearImage)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Remove"}
                </button>
                <button
                    class="analyze-btn"
                    disabled={app.loading || !app.model_available()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Detect)
                    })}
                >
                    { render_detect_button_content(app.loading) }
                </button>
            </div>
        </div>
    }
}

fn render_detect_button_content(loading: bool) -> Html {
    if loading {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Detect Now"}</> }
    }
}
