//! Force-directed connectome graph component.
//!
//! Renders the connectome on an HTML canvas with:
//! - Physics-based node positioning via force simulation, cooling to rest
//! - Pan, zoom (wheel and animated buttons), and node dragging
//! - Eased hover styling and a hover callback for the info panel
//! - Neurotransmitter filtering by edge opacity
//!
//! # Example
//!
//! ```ignore
//! use deepworm::components::force_graph::ForceGraphCanvas;
//!
//! let (filter, _) = signal(NeurotransmitterFilter::All);
//! view! {
//!     <ForceGraphCanvas
//!         connectome=connectome
//!         filter=filter
//!         on_hover=Callback::new(move |node| set_hovered.set(node))
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use state::NodeSummary;
pub use theme::{Theme, ThemeChoice};
