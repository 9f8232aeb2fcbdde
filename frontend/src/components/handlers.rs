use super::super::{App, Msg, Page, SelectedImage, Theme};
use super::utils::extract_image_files;
use crate::api;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_storage::{LocalStorage, Storage};
use shared::DetectionResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub const THEME_KEY: &str = "ikancheck-theme";

pub fn load_theme() -> Theme {
    LocalStorage::get::<String>(THEME_KEY)
        .map(|value| Theme::parse(&value))
        .unwrap_or(Theme::Light)
}

pub fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };

    let class_list = body.class_list();
    let result = match theme {
        Theme::Dark => class_list.add_1("dark-mode"),
        Theme::Light => class_list.remove_1("dark-mode"),
    };
    if result.is_err() {
        log::warn!("Failed to apply the {} theme", theme.as_str());
    }
}

pub fn handle_toggle_theme(app: &mut App) -> bool {
    app.theme = app.theme.toggled();
    apply_theme(app.theme);
    if let Err(e) = LocalStorage::set(THEME_KEY, app.theme.as_str()) {
        log::warn!("Failed to persist theme: {:?}", e);
    }
    true
}

pub fn handle_file_chosen(app: &mut App, file: GlooFile) -> bool {
    let preview_url = ObjectUrl::from(file.clone());
    // Dropping the previous selection revokes its object URL
    app.selected = Some(SelectedImage { file, preview_url });
    app.result = None;
    app.error = None;
    true
}

pub fn handle_clear_image(app: &mut App) -> bool {
    app.selected = None;
    app.result = None;
    app.error = None;
    true
}

pub fn handle_drop(app: &mut App, ctx: &Context<App>, event: DragEvent) -> bool {
    event.prevent_default();
    app.is_dragging = false;

    if let Some(file_list) = event.data_transfer().and_then(|dt| dt.files()) {
        process_file_list(ctx, &file_list);
    }

    true
}

pub fn handle_paste(app: &mut App, ctx: &Context<App>, event: ClipboardEvent) -> bool {
    if app.page != Page::Detect {
        return false;
    }

    if let Some(file_list) = event.clipboard_data().and_then(|dt| dt.files()) {
        if file_list.length() > 0 {
            event.prevent_default();
            process_file_list(ctx, &file_list);
            return true;
        }
    }
    false
}

/// Only one image is detected at a time; extra files are ignored.
fn process_file_list(ctx: &Context<App>, file_list: &FileList) {
    let mut files = extract_image_files(file_list);
    if files.is_empty() {
        ctx.link().send_message(Msg::SetError(Some(
            "Please choose a JPG or PNG image.".into(),
        )));
        return;
    }
    if files.len() > 1 {
        log::warn!("Received {} images, keeping the first one", files.len());
    }
    ctx.link().send_message(Msg::FileChosen(files.remove(0)));
}

pub fn handle_detect(app: &mut App, ctx: &Context<App>) -> bool {
    if app.loading {
        return false;
    }

    let Some(selected) = &app.selected else {
        app.error = Some("Choose a fish photo first.".into());
        return true;
    };

    app.loading = true;
    app.error = None;
    app.result = None;

    let file = selected.file.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::detect(&file).await {
            Ok(response) => link.send_message(Msg::DetectionResult(response)),
            Err(e) => link.send_message(Msg::SetError(Some(e))),
        }
    });

    true
}

pub fn handle_detection_result(app: &mut App, response: DetectionResponse) -> bool {
    log::info!(
        "Detected {} ({:.1}%)",
        response.label,
        response.confidence_percent
    );
    if let Some(e) = &response.record_error {
        log::warn!("Result was not saved to history: {}", e);
    }
    app.result = Some(response);
    app.loading = false;
    true
}
