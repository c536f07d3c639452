use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};
use crate::layout::{
    DashboardLayout, PAYLOAD_SLIDER_ID, SITE_DROPDOWN_ID, SUCCESS_PAYLOAD_SCATTER_CHART_ID,
    SUCCESS_PIE_CHART_ID,
};
use crate::view::{build_payload_correlation, build_success_distribution, ChartSpec};

// ---------------------------------------------------------------------------
// Widget identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

impl InputId {
    pub fn as_str(self) -> &'static str {
        match self {
            InputId::SiteDropdown => SITE_DROPDOWN_ID,
            InputId::PayloadSlider => PAYLOAD_SLIDER_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input '{0}'")]
pub struct UnknownInput(pub String);

impl FromStr for InputId {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SITE_DROPDOWN_ID => Ok(InputId::SiteDropdown),
            PAYLOAD_SLIDER_ID => Ok(InputId::PayloadSlider),
            other => Err(UnknownInput(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OutputId {
    #[serde(rename = "success-pie-chart")]
    SuccessPieChart,
    #[serde(rename = "success-payload-scatter-chart")]
    SuccessPayloadScatterChart,
}

impl OutputId {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputId::SuccessPieChart => SUCCESS_PIE_CHART_ID,
            OutputId::SuccessPayloadScatterChart => SUCCESS_PAYLOAD_SCATTER_CHART_ID,
        }
    }
}

// ---------------------------------------------------------------------------
// Input state and events
// ---------------------------------------------------------------------------

/// Current value of every input widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

impl Default for Inputs {
    fn default() -> Self {
        let layout = DashboardLayout::default();
        Self {
            site: layout.default_site(),
            payload: layout.payload_slider.default_range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SiteChanged(SiteSelector),
    PayloadChanged(PayloadRange),
}

impl InputEvent {
    pub fn input(&self) -> InputId {
        match self {
            InputEvent::SiteChanged(_) => InputId::SiteDropdown,
            InputEvent::PayloadChanged(_) => InputId::PayloadSlider,
        }
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

pub type ComputeFn = fn(&LaunchDataset, &Inputs) -> ChartSpec;

/// One output recomputed from a fixed set of inputs.
#[derive(Clone, Copy)]
pub struct Binding {
    pub output: OutputId,
    pub inputs: &'static [InputId],
    compute: ComputeFn,
}

impl Binding {
    pub fn new(output: OutputId, inputs: &'static [InputId], compute: ComputeFn) -> Self {
        Self {
            output,
            inputs,
            compute,
        }
    }

    pub fn subscribes_to(&self, input: InputId) -> bool {
        self.inputs.contains(&input)
    }

    pub fn compute(&self, dataset: &LaunchDataset, inputs: &Inputs) -> ChartSpec {
        (self.compute)(dataset, inputs)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

fn compute_pie(dataset: &LaunchDataset, inputs: &Inputs) -> ChartSpec {
    build_success_distribution(dataset, &inputs.site).into()
}

fn compute_scatter(dataset: &LaunchDataset, inputs: &Inputs) -> ChartSpec {
    build_payload_correlation(dataset, &inputs.site, inputs.payload).into()
}

/// The dashboard's two independent bindings:
/// site → pie, and (site, payload) → scatter.
pub fn default_bindings() -> Vec<Binding> {
    vec![
        Binding::new(OutputId::SuccessPieChart, &[InputId::SiteDropdown], compute_pie),
        Binding::new(
            OutputId::SuccessPayloadScatterChart,
            &[InputId::SiteDropdown, InputId::PayloadSlider],
            compute_scatter,
        ),
    ]
}

/// Recompute the bindings subscribed to `changed`, or all of them for `None`.
///
/// Stateless; the caller supplies the full input state.
pub fn evaluate(
    bindings: &[Binding],
    dataset: &LaunchDataset,
    inputs: &Inputs,
    changed: Option<InputId>,
) -> Vec<(OutputId, ChartSpec)> {
    bindings
        .iter()
        .filter(|b| changed.map_or(true, |input| b.subscribes_to(input)))
        .map(|b| {
            log::debug!("recomputing {} for {inputs:?}", b.output.as_str());
            (b.output, b.compute(dataset, inputs))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Holds the input state and the last computed chart for every output.
///
/// Each event writes one input and synchronously recomputes the bindings
/// that read it, in full.
pub struct Dispatcher {
    dataset: Arc<LaunchDataset>,
    bindings: Vec<Binding>,
    inputs: Inputs,
    outputs: BTreeMap<OutputId, ChartSpec>,
}

impl Dispatcher {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self::with_bindings(dataset, default_bindings(), Inputs::default())
    }

    /// Initial render: every binding is computed once.
    pub fn with_bindings(dataset: Arc<LaunchDataset>, bindings: Vec<Binding>, inputs: Inputs) -> Self {
        let outputs = evaluate(&bindings, &dataset, &inputs, None)
            .into_iter()
            .collect();
        Self {
            dataset,
            bindings,
            inputs,
            outputs,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn output(&self, id: OutputId) -> Option<&ChartSpec> {
        self.outputs.get(&id)
    }

    /// Outputs that depend on `input`, in binding order.
    pub fn subscribers(&self, input: InputId) -> impl Iterator<Item = OutputId> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.subscribes_to(input))
            .map(|b| b.output)
    }

    /// Apply an input change. Returns the outputs that were rewritten; an
    /// event that leaves the input unchanged rewrites nothing.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<OutputId> {
        let input = event.input();
        let changed = match event {
            InputEvent::SiteChanged(site) => {
                let changed = self.inputs.site != site;
                self.inputs.site = site;
                changed
            }
            InputEvent::PayloadChanged(range) => {
                let changed = self.inputs.payload != range;
                self.inputs.payload = range;
                changed
            }
        };
        if !changed {
            return Vec::new();
        }

        let updated = evaluate(&self.bindings, &self.dataset, &self.inputs, Some(input));
        let ids = updated.iter().map(|(id, _)| *id).collect();
        self.outputs.extend(updated);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(sample_dataset()))
    }

    fn pie(d: &Dispatcher) -> &crate::view::PieChart {
        d.output(OutputId::SuccessPieChart).and_then(ChartSpec::as_pie).unwrap()
    }

    fn scatter(d: &Dispatcher) -> &crate::view::ScatterChart {
        d.output(OutputId::SuccessPayloadScatterChart)
            .and_then(ChartSpec::as_scatter)
            .unwrap()
    }

    #[test]
    fn initial_render_fills_every_output() {
        let d = dispatcher();
        assert_eq!(d.inputs(), &Inputs::default());
        assert_eq!(pie(&d).title, "Total Success Launches by Site");
        assert_eq!(scatter(&d).point_count(), 12);
    }

    #[test]
    fn site_change_recomputes_both_outputs() {
        let mut d = dispatcher();
        let updated = d.dispatch(InputEvent::SiteChanged(SiteSelector::site("CCAFS LC-40")));
        assert_eq!(
            updated,
            vec![OutputId::SuccessPieChart, OutputId::SuccessPayloadScatterChart]
        );
        assert_eq!(pie(&d).title, "Total Success Launches for CCAFS LC-40");
        assert_eq!(scatter(&d).point_count(), 4);
    }

    #[test]
    fn payload_change_only_touches_scatter() {
        let mut d = dispatcher();
        d.dispatch(InputEvent::SiteChanged(SiteSelector::site("VAFB SLC-4E")));
        let pie_before = pie(&d).clone();

        let updated = d.dispatch(InputEvent::PayloadChanged(PayloadRange::new(2000.0, 4000.0)));
        assert_eq!(updated, vec![OutputId::SuccessPayloadScatterChart]);
        assert_eq!(pie(&d), &pie_before);
        assert_eq!(scatter(&d).point_count(), 2);
    }

    #[test]
    fn unchanged_value_is_a_no_op() {
        let mut d = dispatcher();
        assert!(d.dispatch(InputEvent::SiteChanged(SiteSelector::All)).is_empty());
        assert!(d.dispatch(InputEvent::PayloadChanged(PayloadRange::full())).is_empty());
    }

    #[test]
    fn unknown_site_renders_empty_charts() {
        let mut d = dispatcher();
        d.dispatch(InputEvent::SiteChanged(SiteSelector::site("Boca Chica")));
        assert!(pie(&d).slices.is_empty());
        assert_eq!(scatter(&d).point_count(), 0);
    }

    #[test]
    fn subscriptions_match_declared_inputs() {
        let d = dispatcher();
        assert_eq!(
            d.subscribers(InputId::SiteDropdown).collect::<Vec<_>>(),
            vec![OutputId::SuccessPieChart, OutputId::SuccessPayloadScatterChart]
        );
        assert_eq!(
            d.subscribers(InputId::PayloadSlider).collect::<Vec<_>>(),
            vec![OutputId::SuccessPayloadScatterChart]
        );
    }

    #[test]
    fn evaluate_is_stateless_and_repeatable() {
        let ds = sample_dataset();
        let bindings = default_bindings();
        let inputs = Inputs {
            site: SiteSelector::site("KSC LC-39A"),
            payload: PayloadRange::new(0.0, 5000.0),
        };
        let first = evaluate(&bindings, &ds, &inputs, Some(InputId::PayloadSlider));
        let second = evaluate(&bindings, &ds, &inputs, Some(InputId::PayloadSlider));
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(evaluate(&bindings, &ds, &inputs, None).len(), 2);
    }

    #[test]
    fn input_ids_parse_from_widget_ids() {
        assert_eq!("site-dropdown".parse::<InputId>(), Ok(InputId::SiteDropdown));
        assert_eq!("payload-slider".parse::<InputId>(), Ok(InputId::PayloadSlider));
        assert!("success-pie-chart".parse::<InputId>().is_err());
    }
}
