pub mod constants;
pub mod layout;
mod options;
mod types;
pub mod typography;
pub mod units;

pub use layout::{
    BookParameters, GridParameters, GridPosition, LayoutSummary, Margins, PosterLayout,
    PosterParameters, ShadingBand, ShadingSpan, SignatureParameters, TitleParameters,
    YearShadingParameters, group_starts, resolve_layout, shading_spans,
};
pub use options::*;
pub use types::*;
pub use typography::{FontSpec, TextMeasurer};
pub use units::{Dimensions, Length, Position, Unit};
