use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

pub const ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || inner_callback()));
    })
}

pub fn is_accepted_type(mime: &str) -> bool {
    ACCEPTED_TYPES.contains(&mime)
}

pub fn extract_image_files(file_list: &FileList) -> Vec<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .filter(|file| is_accepted_type(&file.type_()))
        .map(GlooFile::from)
        .collect()
}

/// Width of a confidence bar, clamped to the 0-100 range.
pub fn bar_width(percent: f32) -> String {
    format!("width: {:.1}%", percent.clamp(0.0, 100.0))
}

pub fn render_error_message(error: &Option<String>) -> Html {
    if let Some(error_msg) = error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_loading(text: &str) -> Html {
    html! {
        <div class="loading">
            <i class="fa-solid fa-spinner fa-spin"></i>
            { format!(" {}", text) }
        </div>
    }
}
