//! UI components for the storefront.

pub mod app;
pub mod cart_panel;
pub mod header;
pub mod layout;
pub mod product_card;
pub mod sidebar;

pub use cart_panel::CartPanel;
pub use header::Header;
pub use layout::Layout;
pub use product_card::ProductCard;
pub use sidebar::Sidebar;
