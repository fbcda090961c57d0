use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::session::EditorSession;
use crate::surface::{FragmentedSurface, Surface, place_caret};

impl App {
    /// Run the main event loop and return the final share hash.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&self) -> Result<String> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, textarea requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);
        let _ = execute!(stdout(), EnableBracketedPaste);

        let mut model = self.prepare_model((size.width, size.height));
        let result = Self::event_loop(&mut terminal, &mut model);

        // Leaving the editor saves, like losing focus.
        Self::save(&mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();

        result.map(|()| model.session.current_hash().to_string())
    }

    /// Build the initial model: load the document, apply the configured
    /// style and put the caret at the end.
    pub(super) fn prepare_model(&self, size: (u16, u16)) -> Model {
        let _scope = crate::perf::scope("app.prepare_model");
        let mut session = EditorSession::new(self.store.clone())
            .with_autosave_delay(self.autosave_ms)
            .with_download_dir(self.download_dir.clone());
        let mut surface = FragmentedSurface::new();
        session.load(&mut surface, self.hash.as_deref());

        let style_changed = self.style.is_some() && surface.style() != self.style.as_deref();
        if style_changed {
            surface.set_style(self.style.clone());
        }
        let end = surface.char_len();
        place_caret(&mut surface, end);

        let mut model = Model::new(surface, session, size);
        model.options.tab_indent = self.tab_indent;
        if style_changed {
            Self::save(&mut model);
        }
        crate::perf::log_event(
            "init.model",
            format!(
                "chars={} hash_len={} size={}x{}",
                model.surface.char_len(),
                model.session.current_hash().len(),
                size.0,
                size.1
            ),
        );
        model.scroll_to_caret();
        model
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            match model.session.tick(&model.surface, now_ms) {
                Ok(true) => {
                    model.dirty = false;
                    needs_render = true;
                    crate::perf::log_event("autosave.fire", format!("frame={frame_idx}"));
                }
                Ok(false) => {}
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Autosave failed: {err}"));
                    needs_render = true;
                }
            }

            let poll_ms = if needs_render {
                0
            } else if model.session.autosave_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) = Self::handle_event(&event::read()?) {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    Self::dispatch(model, msg, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) = Self::handle_event(&event::read()?) {
                        drained += 1;
                        Self::dispatch(model, msg, drain_ms);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| super::render::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Run one message through update, autosave queueing and side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message, now_ms: u64) {
        if msg.is_edit() {
            model.session.note_input(now_ms);
        }
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
        model.scroll_to_caret();
    }
}
