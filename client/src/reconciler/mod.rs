mod lamp_scene;
mod panel;
#[allow(clippy::module_inception)]
mod reconciler;
mod report;
mod selection;
mod task_board;

pub use lamp_scene::{LampScene, LampVisual, TemperatureBand};
pub use panel::{FleetCounters, LampRow, PanelView};
pub use reconciler::Reconciler;
pub use report::ReconcileReport;
pub use selection::Selection;
pub use task_board::TaskBoard;
