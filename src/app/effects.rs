use std::io::{Write, stdout};

use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => {
                if Self::save(model) {
                    model.show_toast(ToastLevel::Info, "Saved");
                }
            }
            Message::Download => {
                Self::save(model);
                match model.session.download(&model.surface) {
                    Ok(path) => {
                        model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        model.show_toast(ToastLevel::Error, format!("Download failed: {err}"));
                        crate::perf::log_event("download.error", format!("err={err}"));
                    }
                }
            }
            Message::CopyLink => {
                if !Self::save(model) {
                    return;
                }
                let link = model.session.links().markdown;
                match copy_to_clipboard_osc52(&link) {
                    Ok(()) => model.show_toast(ToastLevel::Info, "Copied share link"),
                    Err(err) => {
                        model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
                    }
                }
            }
            _ => {}
        }
    }

    /// Save through the session, reporting failures as a toast.
    pub(super) fn save(model: &mut Model) -> bool {
        match model.session.save(&model.surface) {
            Ok(_) => {
                model.dirty = false;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                false
            }
        }
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::osc52_sequence;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("/md#abc");
        assert_eq!(seq, "\x1b]52;c;L21kI2FiYw==\x07");
    }
}
