use super::utils::{render_error_message, render_loading};
use crate::api;
use shared::HistoryEntry;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Message left on screen once a re-fetch finishes. A failed delete stays
/// visible even when the listing itself loads fine.
pub fn reload_message(pending: Option<String>, fetch_error: Option<String>) -> Option<String> {
    match (pending, fetch_error) {
        (Some(pending), Some(fetch_error)) => Some(format!("{} ({})", pending, fetch_error)),
        (pending, fetch_error) => pending.or(fetch_error),
    }
}

/// Re-read the whole listing from the server. `pending` is an error from the
/// action that triggered the reload.
async fn reload(
    entries: UseStateHandle<Vec<HistoryEntry>>,
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
    pending: Option<String>,
) {
    let fetch_error = match api::fetch_history().await {
        Ok(list) => {
            entries.set(list);
            None
        }
        Err(e) => {
            log::error!("Failed to load history: {}", e);
            Some(e)
        }
    };
    error.set(reload_message(pending, fetch_error));
    loading.set(false);
}

#[function_component(History)]
pub fn history() -> Html {
    let entries = use_state(Vec::<HistoryEntry>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let deleting = use_state(|| None::<String>);

    {
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            spawn_local(reload(entries, loading, error, None));
            || ()
        });
    }

    let on_delete = {
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();
        let deleting = deleting.clone();

        Callback::from(move |id: String| {
            let entries = entries.clone();
            let loading = loading.clone();
            let error = error.clone();
            let deleting = deleting.clone();

            deleting.set(Some(id.clone()));
            spawn_local(async move {
                let delete_error = match api::delete_history(&id).await {
                    Ok(response) if !response.deleted => {
                        log::warn!("History entry {} was already removed", response.id);
                        None
                    }
                    Ok(_) => {
                        log::info!("Deleted history entry {}", id);
                        None
                    }
                    Err(e) => {
                        log::error!("Failed to delete {}: {}", id, e);
                        Some(format!("Could not delete {}: {}", id, e))
                    }
                };
                deleting.set(None);
                reload(entries, loading, error, delete_error).await;
            });
        })
    };

    if *loading {
        return render_loading("Loading history...");
    }

    html! {
        <section class="history-page">
            <h2><i class="fa-solid fa-clock-rotate-left"></i>{" Detection History"}</h2>
            { render_error_message(&error) }
            {
                if entries.is_empty() {
                    html! { <p class="no-results-message">{"No detections yet. Try the Detect page first."}</p> }
                } else {
                    html! {
                        <div class="history-grid">
                            { for entries.iter().map(|entry| render_card(entry, deleting.as_deref(), &on_delete)) }
                        </div>
                    }
                }
            }
        </section>
    }
}

fn render_card(entry: &HistoryEntry, deleting: Option<&str>, on_delete: &Callback<String>) -> Html {
    let is_deleting = deleting == Some(entry.id.as_str());
    let onclick = {
        let on_delete = on_delete.clone();
        let id = entry.id.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    };

    html! {
        <div class="card history-card" key={entry.id.clone()}>
            <img src={entry.image_url.clone()} alt={entry.label.clone()} loading="lazy" />
            <div class="history-meta">
                <p class="history-label">{ &entry.label }</p>
                <p class="history-time"><i class="fa-regular fa-clock"></i>{ format!(" {}", entry.display_time) }</p>
            </div>
            <button class="remove-btn" title="Delete this entry" disabled={is_deleting} {onclick}>
                {
                    if is_deleting {
                        html! { <i class="fa-solid fa-spinner fa-spin"></i> }
                    } else {
                        html! { <><i class="fa-solid fa-trash"></i>{" Delete"}</> }
                    }
                }
            </button>
        </div>
    }
}
