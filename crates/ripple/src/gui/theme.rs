use gtk::gdk;
use gtk4 as gtk;

pub const CARD_LABEL_CLASS: &str = "ripple-card-label";
/// Added to a card label once a selecting ripple covers most of the card.
pub const SELECTED_CLASS: &str = "selected";

const CSS: &str = "
.ripple-window {
    background-color: #f2f2f2;
}

.ripple-card-label {
    color: black;
    font-size: 16px;
    font-weight: bold;
}

.ripple-card-label.selected {
    color: white;
}
";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
