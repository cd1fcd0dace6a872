//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod drift;
pub(crate) mod export;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use drift::DriftArgs;
pub(crate) use export::ExportArgs;
pub(crate) use render::RenderArgs;
