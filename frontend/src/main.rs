mod api;
mod components;

use components::education::Education;
use components::history::History;
use components::{about, handlers, header, home, preview_area, results, theme_toggle, upload_section, utils};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{DetectionResponse, HealthResponse};
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Detect,
    Education,
    History,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Detect,
        Page::Education,
        Page::History,
        Page::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Detect => "Detect",
            Page::Education => "Education",
            Page::History => "History",
            Page::About => "About",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Home => "fa-solid fa-house",
            Page::Detect => "fa-solid fa-magnifying-glass",
            Page::Education => "fa-solid fa-book-open",
            Page::History => "fa-solid fa-clock-rotate-left",
            Page::About => "fa-solid fa-circle-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than "dark" falls back to the light theme.
    pub fn parse(value: &str) -> Self {
        if value == "dark" { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// The chosen image waiting for detection
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

pub enum Msg {
    Navigate(Page),
    ToggleTheme,
    HealthLoaded(HealthResponse),

    // Detect page
    FileChosen(GlooFile),
    ClearImage,
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
    Detect,
    DetectionResult(DetectionResponse),
    SetError(Option<String>),
}

pub struct App {
    pub page: Page,
    pub theme: Theme,
    pub selected: Option<SelectedImage>,
    pub result: Option<DetectionResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_dragging: bool,
    pub health: Option<HealthResponse>,
    // Held so the window listener lives as long as the app
    _paste_listener: Option<EventListener>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let theme = handlers::load_theme();
        handlers::apply_theme(theme);

        let paste_listener = web_sys::window().map(|window| {
            let link = ctx.link().clone();
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::fetch_health().await {
                Ok(health) => link.send_message(Msg::HealthLoaded(health)),
                Err(e) => log::error!("Health check failed: {}", e),
            }
        });

        Self {
            page: Page::Home,
            theme,
            selected: None,
            result: None,
            loading: false,
            error: None,
            is_dragging: false,
            health: None,
            _paste_listener: paste_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                if self.page == page {
                    return false;
                }
                self.page = page;
                self.error = None;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),
            Msg::HealthLoaded(health) => {
                if let Some(e) = &health.model_error {
                    log::warn!("Detection is unavailable: {}", e);
                }
                self.health = Some(health);
                true
            }

            Msg::FileChosen(file) => handlers::handle_file_chosen(self, file),
            Msg::ClearImage => handlers::handle_clear_image(self),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
            Msg::Detect => handlers::handle_detect(self, ctx),
            Msg::DetectionResult(response) => handlers::handle_detection_result(self, response),
            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="container">
                <div class="top-bar">
                    { header::render_header() }
                    { theme_toggle::render_theme_toggle(self.theme, link) }
                </div>
                { header::render_nav(self.page, link) }

                <main class="main-content">
                    {
                        match self.page {
                            Page::Home => home::render_home(link),
                            Page::Detect => self.render_detect(ctx),
                            Page::Education => html! { <Education /> },
                            Page::History => html! { <History /> },
                            Page::About => about::render_about(),
                        }
                    }
                </main>

                <footer class="app-footer">
                    <p>{"IkanCheck | Fish disease detection | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl App {
    pub fn model_available(&self) -> bool {
        self.health.as_ref().is_none_or(|health| health.model_loaded)
    }

    fn render_model_warning(&self) -> Html {
        match &self.health {
            Some(health) if !health.model_loaded => html! {
                <div class="error-message">
                    <i class="fa-solid fa-triangle-exclamation"></i>
                    <p>
                        { "The detection model is not loaded, so detection is disabled. " }
                        { health.model_error.clone().unwrap_or_default() }
                    </p>
                </div>
            },
            _ => html! {},
        }
    }

    fn render_detect(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="detect-page">
                <h2><i class="fa-solid fa-fish"></i>{" Detect Fish Disease"}</h2>
                <p class="subtitle">{"Upload one clear photo of your fish to check its condition."}</p>
                { self.render_model_warning() }
                <div class="detect-layout">
                    <div class="upload-section">
                        { upload_section::render_upload_section(self, ctx) }
                        { preview_area::render_preview_area(self, ctx) }
                    </div>
                    { upload_section::render_photo_tips() }
                </div>
                { utils::render_error_message(&self.error) }
                { results::render_results(self) }
            </section>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("IkanCheck starting...");
    yew::Renderer::<App>::new().render();
}
