use eframe::egui::{self, RichText, Ui};

use spacex_dash::controller::{Dispatcher, InputEvent};
use spacex_dash::data::model::{PayloadRange, SiteSelector};
use spacex_dash::layout::{DashboardLayout, Dropdown, RangeSlider};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Heading and a one-line dataset summary.
pub fn top_bar(ui: &mut Ui, layout: &DashboardLayout, dispatcher: &Dispatcher) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new(layout.heading)
                .size(28.0)
                .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });

    let ds = dispatcher.dataset();
    let bounds = ds
        .payload_bounds()
        .map(|(min, max)| format!(", payload {min:.0}–{max:.0} kg"))
        .unwrap_or_default();
    ui.label(format!(
        "{} launches from {} sites{bounds}",
        ds.len(),
        ds.sites().len()
    ));
}

// ---------------------------------------------------------------------------
// Input widgets
// ---------------------------------------------------------------------------

/// Launch site selector. When the dropdown is searchable, a text box at the
/// top of the popup narrows the list. Returns an event when the user picks a
/// different value.
pub fn site_dropdown(
    ui: &mut Ui,
    dropdown: &Dropdown,
    current: &SiteSelector,
    search: &mut String,
) -> Option<InputEvent> {
    let current_value = current.to_string();
    let mut picked: Option<&str> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Launch Site");
        egui::ComboBox::from_id_salt(dropdown.id)
            .width(220.0)
            .selected_text(dropdown.label_for(&current_value))
            .show_ui(ui, |ui: &mut Ui| {
                if dropdown.searchable {
                    ui.add(
                        egui::TextEdit::singleline(search)
                            .hint_text(dropdown.placeholder)
                            .desired_width(f32::INFINITY),
                    );
                    ui.separator();
                }
                let mut any = false;
                for option in dropdown.matching(search.as_str()) {
                    any = true;
                    if ui
                        .selectable_label(option.value == current_value, &option.label)
                        .clicked()
                    {
                        picked = Some(option.value.as_str());
                    }
                }
                if !any {
                    ui.label(RichText::new("no matching site").weak());
                }
            })
            .response
            .on_hover_text(dropdown.placeholder);
    });

    if picked.is_some() {
        search.clear();
    }
    picked
        .filter(|value| *value != current_value)
        .map(|value| InputEvent::SiteChanged(value.parse().unwrap_or_default()))
}

/// Payload range as two stepped sliders sharing the declared bounds.
pub fn payload_slider(ui: &mut Ui, slider: &RangeSlider, current: PayloadRange) -> Option<InputEvent> {
    let mut low = current.low;
    let mut high = current.high;
    let mut changed = false;

    ui.label("Payload range (Kg):");
    ui.horizontal(|ui: &mut Ui| {
        for (value, text) in [(&mut low, "min"), (&mut high, "max")] {
            changed |= ui
                .add(
                    egui::Slider::new(value, slider.min..=slider.max)
                        .step_by(slider.step)
                        .text(text),
                )
                .changed();
        }
    });
    mark_row(ui, slider);

    if low > high {
        ui.label(RichText::new("min is above max: no launches selected").weak());
    }

    changed.then(|| InputEvent::PayloadChanged(PayloadRange::new(low, high)))
}

/// Tick labels under the sliders, one per declared mark.
fn mark_row(ui: &mut Ui, slider: &RangeSlider) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 14.0;
        for label in slider.mark_labels() {
            ui.label(RichText::new(label).small().weak());
        }
    });
}
