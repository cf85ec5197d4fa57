//! Page loaders.
//!
//! Each loader issues its GETs through a [`Fetcher`] and returns a
//! [`ViewModel`]. Fatal failures never escape as `Err`; they are collapsed
//! into the failure view-model at the top of each loader.

pub mod flat;
pub mod project;

pub use flat::load_flat_resource;
pub use project::load_project_aggregate;

use crate::fetch::Fetcher;
use crate::models::{Page, ViewModel, IMAGE, SERVICE};

/// Load the view-model for a detail page.
pub async fn load_page(fetcher: &dyn Fetcher, page: Page, id: &str) -> ViewModel {
    match page {
        Page::Image => load_flat_resource(fetcher, &IMAGE, id).await,
        Page::Service => load_flat_resource(fetcher, &SERVICE, id).await,
        Page::Project => load_project_aggregate(fetcher, id).await,
    }
}
