use yew::prelude::*;

pub fn render_about() -> Html {
    html! {
        <section class="about-page card">
            <h2><i class="fa-solid fa-circle-info"></i>{" About IkanCheck"}</h2>
            <p>
                {"IkanCheck classifies a photo of a fish into one of seven conditions: five \
                  diseases, a group of parasitic infections, and healthy fish. The classifier \
                  is a convolutional network based on Xception, trained on a public Kaggle \
                  dataset of freshwater fish images."}
            </p>
            <p>
                {"Every detection is kept on the server as a photo named after the time and the \
                  predicted condition, so earlier results can be reviewed or removed from the \
                  History page."}
            </p>
            <p class="disclaimer">
                {"Results are indicative only. Always confirm a diagnosis with an aquaculture \
                  expert or veterinarian before treating your fish."}
            </p>
        </section>
    }
}
