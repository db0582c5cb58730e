//! Tab navigation and the read-only projection of the report into tabs.

pub mod layout;
pub mod projection;
pub mod tab;

pub use layout::{FieldKind, SIGNATURE_PLACEHOLDER, field_kind, tab_layout};
pub use projection::{
    RenderedCheck, RenderedField, RenderedItem, RenderedSection, SectionBody, TabView,
    progress_bar, render_tab, render_tab_on,
};
pub use tab::{ReportTab, TabNavigator};
