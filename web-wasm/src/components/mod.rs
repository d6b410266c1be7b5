pub mod builder_panel;
pub mod design_cards;
pub mod hand_preview;
pub mod header;
pub mod image_upload;
pub mod price_panel;
pub mod toast;
pub mod tryon_panel;
