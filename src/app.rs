use std::sync::Arc;

use eframe::egui;

use spacex_dash::controller::{Dispatcher, InputEvent, OutputId};
use spacex_dash::data::model::LaunchDataset;
use spacex_dash::layout::DashboardLayout;
use spacex_dash::view::ChartSpec;

use crate::color::ColorMap;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    dispatcher: Dispatcher,
    layout: DashboardLayout,
    /// Booster category colours, fixed for the whole dataset.
    category_colors: ColorMap,
    /// Text typed into the site dropdown's search box.
    site_search: String,
}

impl DashboardApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let layout = DashboardLayout::default();
        layout.payload_slider.covers(&dataset);

        let category_colors = ColorMap::new(
            dataset
                .records()
                .iter()
                .map(|r| r.booster_version_category.as_str()),
        );

        Self {
            dispatcher: Dispatcher::new(dataset),
            layout,
            category_colors,
            site_search: String::new(),
        }
    }

    fn handle(&mut self, event: InputEvent) {
        let updated = self.dispatcher.dispatch(event);
        if !updated.is_empty() {
            log::debug!("updated outputs {updated:?}");
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: heading + dataset summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.layout, &self.dispatcher);
        });

        let mut events: Vec<InputEvent> = Vec::new();

        // ---- Central panel: controls and charts, top to bottom ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let inputs = self.dispatcher.inputs();

                    events.extend(panels::site_dropdown(
                        ui,
                        &self.layout.site_dropdown,
                        &inputs.site,
                        &mut self.site_search,
                    ));
                    ui.add_space(8.0);

                    if let Some(pie) = self
                        .dispatcher
                        .output(OutputId::SuccessPieChart)
                        .and_then(ChartSpec::as_pie)
                    {
                        plot::pie_chart(ui, self.layout.pie_chart_id, pie);
                    }
                    ui.add_space(8.0);

                    events.extend(panels::payload_slider(
                        ui,
                        &self.layout.payload_slider,
                        inputs.payload,
                    ));

                    if let Some(scatter) = self
                        .dispatcher
                        .output(OutputId::SuccessPayloadScatterChart)
                        .and_then(ChartSpec::as_scatter)
                    {
                        plot::scatter_chart(
                            ui,
                            self.layout.scatter_chart_id,
                            scatter,
                            &self.category_colors,
                        );
                    }
                });
        });

        if !events.is_empty() {
            for event in events {
                self.handle(event);
            }
            ctx.request_repaint();
        }
    }
}
