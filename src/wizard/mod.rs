/// Stubbed checkout.
pub mod checkout;
/// Step navigation.
pub mod machine;
pub mod steps;
