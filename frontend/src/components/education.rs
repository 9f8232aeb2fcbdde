use super::utils::{render_error_message, render_loading};
use crate::api;
use shared::{AdvisoryView, ClassLabel};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(Education)]
pub fn education() -> Html {
    let entries = use_state(Vec::<AdvisoryView>::new);
    let active = use_state(|| ClassLabel::ALL[0]);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_education().await {
                    Ok(list) => entries.set(list),
                    Err(e) => {
                        log::error!("Failed to load disease information: {}", e);
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    if *loading {
        return render_loading("Loading disease information...");
    }

    let current = entries.iter().find(|entry| entry.label == *active);

    html! {
        <section class="education-page">
            <h2><i class="fa-solid fa-book-open"></i>{" Fish Disease Guide"}</h2>
            { render_error_message(&error) }
            <div class="tabs">
                { for entries.iter().map(|entry| {
                    let label = entry.label;
                    let onclick = {
                        let active = active.clone();
                        Callback::from(move |_| active.set(label))
                    };
                    html! {
                        <button
                            class={classes!("tab", (label == *active).then_some("active"))}
                            title={label.as_str()}
                            {onclick}
                        >
                            { entry.short_name.clone() }
                        </button>
                    }
                })}
            </div>
            {
                match current {
                    Some(entry) => render_entry(entry),
                    None => html! {},
                }
            }
        </section>
    }
}

fn render_entry(entry: &AdvisoryView) -> Html {
    html! {
        <article class="card disease-card">
            <h3>{ entry.label.as_str() }</h3>
            <img class="disease-image" src={entry.image_url.clone()} alt={entry.short_name.clone()} />
            <p><strong>{"Also known as: "}</strong>{ &entry.alternate_names }</p>
            <p><strong>{"Cause: "}</strong>{ &entry.cause }</p>

            <h4>{"Symptoms"}</h4>
            <ul>
                { for entry.symptoms.iter().map(|s| html! { <li>{ s }</li> }) }
            </ul>

            <h4>{"Treatment"}</h4>
            <ul>
                { for entry.treatment.iter().map(|t| html! { <li>{ t }</li> }) }
            </ul>

            <h4>{"Prevention"}</h4>
            <p>{ &entry.prevention }</p>
        </article>
    }
}
