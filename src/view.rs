//! Module View
//! Per-session reactive state. Writing the selection recomputes the daily
//! series and pushes it to every subscribed renderer before returning.

use crate::charts::ChartSeries;
use crate::data::{Aggregator, AggregatorError, AttendanceTable, DataProcessor, ProcessorError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Invoked synchronously with the fresh series after every selection write.
pub type Renderer = Box<dyn FnMut(&ChartSeries)>;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown module: {0}")]
    UnknownModule(String),
    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] AggregatorError),
    #[error("Failed to list modules: {0}")]
    Choices(#[from] ProcessorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Charts match the current selection.
    Idle,
    /// A selection write is being aggregated and rendered.
    Recomputing,
}

pub struct ModuleView {
    table: Arc<AttendanceTable>,
    choices: Vec<String>,
    selection: String,
    series: ChartSeries,
    state: ViewState,
    renderers: Vec<Renderer>,
}

impl ModuleView {
    /// Build a session over a shared table, starting on `default_module` when
    /// the dataset has it and on the first module otherwise.
    pub fn new(table: Arc<AttendanceTable>, default_module: &str) -> Result<Self, ViewError> {
        let choices = DataProcessor::module_choices(&table)?;
        let selection = Self::initial_selection(&choices, default_module);
        let daily = Aggregator::daily_attendance(&table, &selection)?;
        let series = ChartSeries::new(&selection, &daily);

        Ok(Self {
            table,
            choices,
            selection,
            series,
            state: ViewState::Idle,
            renderers: Vec::new(),
        })
    }

    fn initial_selection(choices: &[String], default_module: &str) -> String {
        if choices.iter().any(|c| c == default_module) {
            return default_module.to_string();
        }
        match choices.first() {
            Some(first) => {
                warn!(
                    "Default module '{}' not in dataset, selecting '{}'",
                    default_module, first
                );
                first.clone()
            }
            None => {
                warn!("Dataset lists no modules");
                default_module.to_string()
            }
        }
    }

    pub fn table(&self) -> &AttendanceTable {
        &self.table
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Register a renderer. It runs once right away with the current series.
    pub fn subscribe(&mut self, mut renderer: Renderer) {
        renderer(&self.series);
        self.renderers.push(renderer);
    }

    /// Write the selection. Only names from `choices()` are accepted; on error
    /// the previous selection and series stay in place.
    pub fn select(&mut self, module: &str) -> Result<(), ViewError> {
        if !self.choices.iter().any(|c| c == module) {
            return Err(ViewError::UnknownModule(module.to_string()));
        }

        self.state = ViewState::Recomputing;
        let result = self.recompute(module);
        self.state = ViewState::Idle;
        result
    }

    fn recompute(&mut self, module: &str) -> Result<(), ViewError> {
        let daily = Aggregator::daily_attendance(&self.table, module)?;
        debug!("Recomputed {} days for '{}'", daily.len(), module);

        self.selection = module.to_string();
        self.series = ChartSeries::new(module, &daily);
        for renderer in &mut self.renderers {
            renderer(&self.series);
        }
        Ok(())
    }
}
