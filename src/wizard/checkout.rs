use crate::config::model::DesignerConfig;
use crate::config::poster::PosterSize;

/// Message shown by the stubbed checkout.
pub const CHECKOUT_STUB_MESSAGE: &str =
    "Checkout feature coming soon! Your design has been saved.";

/// What would be sent to a payment provider. Checkout itself is not implemented.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutSummary {
    /// Chosen size.
    pub size: PosterSize,
    /// Dimension label of the size.
    pub size_label: &'static str,
    /// Price in USD.
    pub price_usd: u32,
    /// Design snapshot at checkout time.
    pub design: DesignerConfig,
    /// User-facing notice.
    pub message: &'static str,
}

impl CheckoutSummary {
    /// Summarize `design`.
    pub fn for_design(design: &DesignerConfig) -> Self {
        let size = design.poster_size;
        tracing::info!(
            size = size.as_str(),
            price_usd = size.price_usd(),
            "checkout requested (stub)"
        );
        Self {
            size,
            size_label: size.dims().label,
            price_usd: size.price_usd(),
            design: design.clone(),
            message: CHECKOUT_STUB_MESSAGE,
        }
    }
}
