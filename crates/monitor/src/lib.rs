//! The monitor poller: fetches a site's product feed on a schedule,
//! matches watched variants, dedups, and submits [`stockwatch_notify::Job`]s
//! to a site's dispatcher.

mod error;
mod feed;
mod poller;

pub use error::FetchError;
pub use feed::{FeaturedImage, Product, ProductsWrapper, Variant};
pub use poller::{MonitorSpec, Poller, ProductId};
