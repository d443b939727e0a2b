/// One discovered availability event, awaiting notification.
///
/// Immutable after construction: a monitor poller builds it, a dispatcher
/// queues and eventually hands it to exactly one [`crate::Notifier`], which
/// must not mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Site base URL (used to build the cart-add link in the reference
    /// notifier).
    pub site_url: String,
    /// Name of the monitor that produced this job.
    pub monitor_name: String,
    /// Product title as it appeared in the feed.
    pub product_title: String,
    /// Variant title as it appeared in the feed.
    pub variant_title: String,
    /// Stringified variant ID (the feed's numeric ID, rendered as text).
    pub variant_id: String,
    /// Featured image URL, or empty string if the feed had none.
    pub image_url: String,
    /// Price, as a string, straight from the feed.
    pub price: String,
}

impl Job {
    /// Builds a new job. All fields are plain owned strings; callers pass
    /// `String::new()` for `image_url` when the feed had no image.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site_url: impl Into<String>,
        monitor_name: impl Into<String>,
        product_title: impl Into<String>,
        variant_title: impl Into<String>,
        variant_id: impl Into<String>,
        image_url: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            monitor_name: monitor_name.into(),
            product_title: product_title.into(),
            variant_title: variant_title.into(),
            variant_id: variant_id.into(),
            image_url: image_url.into(),
            price: price.into(),
        }
    }
}
