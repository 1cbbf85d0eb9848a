//! Desktop integrations behind small traits: the share target (system
//! clipboard) and the URL opener used for downloads.

use tracing::{info, warn};

use crate::error::AppError;
use crate::model::modal_state::SharePayload;

pub trait ShareTarget: Send {
    /// Hand the payload to the platform; `Err` means the capability is unavailable
    fn share(&mut self, payload: &SharePayload) -> Result<(), AppError>;
}

pub trait UrlOpener: Send {
    fn open(&self, url: &str) -> Result<(), AppError>;
}

/// Shares by putting the payload on the system clipboard
#[derive(Debug, Default)]
pub struct ClipboardShare;

impl ShareTarget for ClipboardShare {
    fn share(&mut self, payload: &SharePayload) -> Result<(), AppError> {
        let text = payload.to_clipboard_text();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => {
                info!("Copied share payload for {}", payload.url);
                Ok(())
            }
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                Err(AppError::Share(e.to_string()))
            }
        }
    }
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), AppError> {
        info!("Opening {}", url);
        open::that(url).map_err(|e| AppError::opener(url, e.to_string()))
    }
}
