use super::super::App;
use super::utils::bar_width;
use yew::prelude::*;

pub fn render_results(app: &App) -> Html {
    let Some(result) = &app.result else {
        return html! {};
    };

    let healthy = result.label.is_healthy();
    let confidence = result.confidence_percent;

    html! {
        <div class={classes!("results-container", if healthy { "healthy" } else { "diseased" })}>
            <div class="result-header">
                <h2>
                    {
                        if healthy {
                            html! { <i class="fa-solid fa-heart-pulse"></i> }
                        } else {
                            html! { <i class="fa-solid fa-triangle-exclamation"></i> }
                        }
                    }
                    { format!(" {}", result.label) }
                </h2>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={bar_width(confidence)}></div>
                    </div>
                    <div class="meter-value">{format!("{:.2}%", confidence)}</div>
                </div>
            </div>

            <details class="advice">
                <summary><i class="fa-solid fa-kit-medical"></i>{" Quick advice"}</summary>
                <p>{ &result.advice }</p>
            </details>

            <div class="detailed-results">
                <h3>{"Confidence per class"}</h3>
                <div class="result-bars">
                    { for result.ranked().into_iter().map(|score| {
                        let percentage = score.probability * 100.0;
                        html! {
                            <div class={classes!("result-item", (score.label == result.label).then_some("top"))}>
                                <div class="result-label">{ score.label.as_str() }</div>
                                <div class="result-bar-container">
                                    <div class="result-bar" style={bar_width(percentage)}></div>
                                </div>
                                <div class="result-value">{ format!("{:.1}%", percentage) }</div>
                            </div>
                        }
                    })}
                </div>
            </div>

            {
                match (&result.record_id, &result.record_error) {
                    (Some(_), _) => html! {
                        <p class="saved-note"><i class="fa-solid fa-floppy-disk"></i>{" Saved to history."}</p>
                    },
                    (None, Some(e)) => html! {
                        <p class="saved-note warning">
                            <i class="fa-solid fa-circle-exclamation"></i>
                            { format!(" Not saved to history: {}", e) }
                        </p>
                    },
                    (None, None) => html! {},
                }
            }
        </div>
    }
}
