/// Session owning the wizard, store and preview.
pub mod designer;
