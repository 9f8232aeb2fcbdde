use super::super::{App, Msg, Page};
use shared::ClassLabel;
use yew::html::Scope;
use yew::prelude::*;

pub fn render_home(link: &Scope<App>) -> Html {
    html! {
        <section class="home-page">
            <div class="card intro-card">
                <h2>{"Welcome to IkanCheck"}</h2>
                <p>
                    {"IkanCheck helps fish farmers and hobbyists spot common fish diseases early. \
                      Upload a photo of your fish and a trained image classifier will suggest the \
                      most likely condition, together with first-aid advice."}
                </p>
                <button class="analyze-btn" onclick={link.callback(|_| Msg::Navigate(Page::Detect))}>
                    <i class="fa-solid fa-magnifying-glass"></i>{" Start Detection"}
                </button>
            </div>

            <div class="stats-grid">
                { render_stat("fa-solid fa-tags", &ClassLabel::ALL.len().to_string(), "Conditions recognised") }
                { render_stat("fa-solid fa-brain", "CNN Xception", "Model architecture") }
                { render_stat("fa-solid fa-database", "Kaggle", "Training dataset") }
            </div>

            <div class="card">
                <h3><i class="fa-solid fa-lightbulb"></i>{" Quick tips"}</h3>
                <ul>
                    <li>{"Change part of the aquarium water every week."}</li>
                    <li>{"Quarantine new fish for two weeks before adding them to the main tank."}</li>
                    <li>{"Watch for changes in appetite, colour and swimming behaviour."}</li>
                    <li>{"A detection result is a guide, not a diagnosis. Ask an expert when in doubt."}</li>
                </ul>
            </div>
        </section>
    }
}

fn render_stat(icon: &str, value: &str, caption: &str) -> Html {
    html! {
        <div class="card stat-card">
            <i class={icon.to_string()}></i>
            <div class="stat-value">{ value }</div>
            <div class="stat-caption">{ caption }</div>
        </div>
    }
}
