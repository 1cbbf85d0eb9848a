//! src/view/ui.rs
//! ============================================================================
//! # View: TUI Render Orchestrator
//!
//! Lays out header, search bar, category bar, grid and status bar, then floats
//! the suggestion panel, modal, help and toast above them. Every draw records
//! the rectangles it used in `ui.regions` and feeds the grid its viewport, so
//! mouse hit-testing and paging always match what is on screen.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::trace;

use crate::model::{app_state::AppState, ui_state::Focus};
use crate::view::components::{
    category_bar::CategoryBar, help_overlay::HelpOverlay, image_grid::ImageGrid,
    image_modal::ImageModal, notification_overlay::NotificationOverlay, search_bar::SearchBar,
    status_bar::StatusBar,
};
use crate::view::theme;

pub const APP_TITLE: &str = "PixelOcean";
pub const TAGLINE: &str = "Discover stunning free images";

pub struct View;

impl View {
    /// Draws the full UI for one frame; called inside `terminal.draw(...)`.
    pub fn redraw(frame: &mut Frame<'_>, app: &mut AppState) {
        let screen = frame.area();
        frame.render_widget(Block::default().style(theme::base_style()), screen);

        let [header, search, categories, grid, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(screen);

        Self::render_header(frame, header);

        let focus = app.ui.focus;
        SearchBar::render(frame, &app.search, focus == Focus::Search, search);
        let chips = CategoryBar::render(
            frame,
            &app.categories,
            focus == Focus::Categories,
            app.ui.frame,
            categories,
        );

        let (cards, footer) = ImageGrid::split(grid);
        app.grid.set_viewport(cards.width, cards.height);
        ImageGrid::render(frame.buffer_mut(), &app.grid, cards, footer, app.ui.frame);

        StatusBar::render(frame, app, status);

        // Overlays
        let suggestions = if app.search.panel_visible() {
            let panel = SearchBar::panel_area(search, app.search.suggestions().len(), screen);
            SearchBar::render_panel(frame, &app.search, panel);
            Some(panel)
        } else {
            None
        };

        let modal = ImageModal::render(frame, &app.modal, screen);

        if app.ui.show_help {
            HelpOverlay::render(frame, screen);
        }

        if let Some(notification) = &app.ui.notification {
            let area = NotificationOverlay::area(screen, notification.level);
            NotificationOverlay::render(frame, notification, area);
        }

        let regions = &mut app.ui.regions;
        regions.search = search;
        regions.suggestions = suggestions;
        regions.categories = categories;
        regions.chips = chips;
        regions.grid = cards;
        regions.modal = modal;

        trace!("Frame drawn at {}x{}", screen.width, screen.height);
    }

    fn render_header(frame: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!(" {APP_TITLE} "),
                Style::default()
                    .fg(theme::PURPLE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(TAGLINE, Style::default().fg(theme::COMMENT)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
