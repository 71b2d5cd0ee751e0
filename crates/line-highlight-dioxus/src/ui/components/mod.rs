pub mod document_view;
pub mod error_screen;
pub mod file_list;
pub mod live_view;
pub mod palette_menu;
pub mod reading_view;

pub use document_view::DocumentView;
pub use error_screen::ErrorScreen;
pub use file_list::FileList;
pub use live_view::LiveView;
pub use palette_menu::PaletteMenu;
pub use reading_view::ReadingView;
