//! Host message routing.

use tracing::{debug, warn};
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::{Command, LogLevel, ModelError};

use crate::session::PlayerSession;
use crate::styles::store_style_change;

/// Host action that clears transient player UI before a selection.
pub const CLEANUP_ACTION: &str = "cleanup";

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Parse and execute a raw host message. Empty messages are ignored and
    /// unknown ones are reported as warnings.
    pub fn handle_message(&mut self, message: &str) {
        match Command::parse(message) {
            Ok(command) => self.dispatch(command),
            Err(ModelError::EmptyCommand) => {}
            Err(err) => {
                warn!(error = %err, "unhandled plugin message");
                self.host.log(
                    LogLevel::Warn,
                    &format!("Unknown plugin message: '{message}'"),
                );
            }
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        debug!(%command, "dispatching plugin command");
        match command {
            Command::Focus(id) => self.selection.options_focus = Some(id),
            Command::SelectAudio(index) => {
                self.host.execute_action(CLEANUP_ACTION);
                self.select_audio_track(index, true, true);
            }
            Command::SelectSubtitle(index) => {
                self.host.execute_action(CLEANUP_ACTION);
                self.select_subtitle_track(index, true, true);
            }
            Command::Fullscreen => {
                self.host.execute_action(CLEANUP_ACTION);
                self.host.request_fullscreen();
            }
            Command::Settings(change) => {
                if let Some(change) = change {
                    store_style_change(&*self.store, &self.config, &change);
                }
                self.apply_styles();
            }
        }
    }
}
