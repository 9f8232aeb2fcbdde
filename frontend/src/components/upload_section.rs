use super::super::{App, Msg};
use super::utils::{debounce, extract_image_files};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(app: &App, ctx: &Context<App>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut files = input.files().as_ref().map(extract_image_files).unwrap_or_default();

        input.set_value("");

        if files.is_empty() {
            Msg::SetError(Some("Please choose a JPG or PNG image.".into()))
        } else {
            Msg::FileChosen(files.remove(0))
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(input) = input {
            input.click();
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/png, image/jpeg"
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="analyze-btn"
                disabled={app.loading}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <i class="fa-solid fa-upload"></i> {" Choose Photo"}
            </button>

            <div
                id="drop-zone"
                class={classes!("upload-area", app.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a fish photo here, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, JPEG, PNG"}</p>
                </div>
            </div>
        </>
    }
}

pub fn render_photo_tips() -> Html {
    html! {
        <aside class="card tips-card">
            <h3><i class="fa-solid fa-camera"></i>{" Photo tips"}</h3>
            <ul>
                <li>{"Make sure the fish is in focus and well lit."}</li>
                <li>{"Show the whole body, including fins and tail."}</li>
                <li>{"Avoid glare from the aquarium glass."}</li>
                <li>{"Use a plain background where possible."}</li>
                <li>{"One fish per photo gives the best result."}</li>
            </ul>
        </aside>
    }
}
