pub mod error;
pub use error::AppError;

pub mod config;

pub mod logging;
pub use logging::Logger;

pub mod util {
    pub mod debounce;
    pub use debounce::{DebounceConfig, Debouncer};
}

pub mod model {
    pub mod app_state;
    pub use app_state::AppState;

    pub mod category_state;
    pub mod grid_state;
    pub use grid_state::{GridState, PageApplied, PageOutcome, PageRequest};
    pub mod masonry;
    pub mod modal_state;
    pub use modal_state::{ModalState, ScrollLock, SharePayload};
    pub mod search_state;
    pub mod ui_state;
    pub use ui_state::{Focus, Notification, NotificationLevel, UIState};

    #[cfg(test)]
    pub(crate) mod test_support;
}

pub mod tasks {
    pub mod catalog_task;
    pub mod page_task;
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod dispatcher;
    pub use dispatcher::Dispatcher;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod key_handler;

    pub mod system;
    pub use system::{ClipboardShare, ShareTarget, SystemOpener, UrlOpener};
}

pub mod view {
    pub mod theme;

    pub mod ui;
    pub use ui::View;

    pub mod components {
        pub mod category_bar;
        pub use category_bar::CategoryBar;
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod image_card;
        pub use image_card::ImageCard;
        pub mod image_grid;
        pub use image_grid::ImageGrid;
        pub mod image_modal;
        pub use image_modal::ImageModal;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod search_bar;
        pub use search_bar::SearchBar;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }
}

pub use model::AppState;
