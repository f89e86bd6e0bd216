//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{DetailState, FormField, PhotoSource, Screen, UiState};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Help popup swallows everything until dismissed
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        match key.code {
            KeyCode::Esc => {
                self.handle_escape(&ui_state).await;
                return Ok(());
            }
            KeyCode::Tab => {
                model.cycle_screen_forward().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_screen_backward().await;
                return Ok(());
            }
            _ => {}
        }

        if !ui_state.is_typing() {
            match key.code {
                KeyCode::Char('?') => {
                    model.show_help_popup().await;
                    return Ok(());
                }
                KeyCode::Char('q') => {
                    model.set_should_quit(true).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if let Some(detail) = &ui_state.detail {
            self.handle_detail_key(key, detail).await;
            return Ok(());
        }

        match ui_state.screen {
            Screen::Spots => self.handle_spots_key(key, &ui_state).await,
            Screen::AddSpot => self.handle_form_key(key, &ui_state).await,
            Screen::Profile => match key.code {
                KeyCode::Left => model.cycle_profile_tab(false).await,
                KeyCode::Right => model.cycle_profile_tab(true).await,
                _ => {}
            },
        }

        Ok(())
    }

    /// Esc peels back one layer: toast, comment composer, detail, search
    async fn handle_escape(&self, ui_state: &UiState) {
        let model = &self.model;
        if model.toasts.is_visible().await {
            model.toasts.hide().await;
        } else if let Some(detail) = &ui_state.detail {
            if detail.composing {
                model.set_composing(false).await;
            } else {
                model.close_detail().await;
            }
        } else if ui_state.search_editing {
            model.set_search_editing(false).await;
        }
    }

    async fn handle_detail_key(&self, key: KeyEvent, detail: &DetailState) {
        let model = &self.model;

        if detail.composing {
            match key.code {
                KeyCode::Enter => {
                    self.post_comment().await;
                }
                KeyCode::Backspace => model.edit_comment(None).await,
                KeyCode::Char(c) => model.edit_comment(Some(c)).await,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Left => model.cycle_detail_photo(false).await,
            KeyCode::Right => model.cycle_detail_photo(true).await,
            KeyCode::Char('a') => model.toggle_detail_anonymous().await,
            KeyCode::Char('i') => model.set_composing(true).await,
            _ => {}
        }
    }

    async fn handle_spots_key(&self, key: KeyEvent, ui_state: &UiState) {
        let model = &self.model;

        if ui_state.search_editing {
            match key.code {
                KeyCode::Enter => model.set_search_editing(false).await,
                KeyCode::Backspace => model.backspace_search().await,
                KeyCode::Char(c) => model.append_to_search(c).await,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => model.set_search_editing(true).await,
            KeyCode::Char('c') => {
                let category = model.cycle_category(true).await;
                tracing::debug!(?category, "Category filter changed");
            }
            KeyCode::Char('C') => {
                model.cycle_category(false).await;
            }
            KeyCode::Char('s') => {
                let sort = model.cycle_sort().await;
                tracing::debug!(%sort, "Sort changed");
            }
            KeyCode::Char('x') => self.clear_filters().await,
            KeyCode::Char('r') => {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.refresh_spots().await;
                });
            }
            KeyCode::Char('l') => {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.locate_user().await;
                });
            }
            KeyCode::Up => model.move_spot_selection(false).await,
            KeyCode::Down => model.move_spot_selection(true).await,
            KeyCode::Enter => self.open_selected_spot().await,
            _ => {}
        }
    }

    async fn handle_form_key(&self, key: KeyEvent, ui_state: &UiState) {
        let model = &self.model;
        let field = ui_state.form_field;

        match key.code {
            KeyCode::Up => {
                model.move_form_focus(false).await;
                return;
            }
            KeyCode::Down => {
                model.move_form_focus(true).await;
                return;
            }
            _ => {}
        }

        if field.accepts_text() {
            match key.code {
                KeyCode::Char(c) => model.edit_form_text(Some(c)).await,
                KeyCode::Backspace => {
                    if field == FormField::Tips && ui_state.tip_input.is_empty() {
                        self.remove_last_tip().await;
                    } else {
                        model.edit_form_text(None).await;
                    }
                }
                KeyCode::Enter if field == FormField::Tips => {
                    self.add_tip().await;
                }
                KeyCode::Enter => model.move_form_focus(true).await,
                _ => {}
            }
            return;
        }

        match (key.code, field) {
            (KeyCode::Left | KeyCode::Right, FormField::Category) => {
                model.cycle_form_category(key.code == KeyCode::Right).await;
            }
            (KeyCode::Left | KeyCode::Right, FormField::Rating(kind)) => {
                model.adjust_rating(kind, key.code == KeyCode::Right).await;
            }
            (KeyCode::Left | KeyCode::Right, FormField::Photos) => {
                model.move_photo_selection(key.code == KeyCode::Right).await;
            }
            (KeyCode::Char('g'), _) | (KeyCode::Enter, FormField::Photos) => {
                self.spawn_photo(PhotoSource::Library);
            }
            (KeyCode::Char('c'), _) => self.spawn_photo(PhotoSource::Camera),
            (KeyCode::Char('d'), _) => self.remove_selected_photo().await,
            (KeyCode::Enter, FormField::Location) => {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.fetch_spot_location().await;
                });
            }
            (KeyCode::Enter, FormField::Submit) => {
                let controller = self.clone();
                tokio::spawn(async move {
                    // an invalid draft has already been reported as a toast
                    let _ = controller.submit_spot().await;
                });
            }
            _ => {}
        }
    }

    fn spawn_photo(&self, source: PhotoSource) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.acquire_photo(source).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::testing::*;
    use crate::model::{FormField, Screen, ToastKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press_all(h: &Harness, codes: impl IntoIterator<Item = KeyCode>) {
        for code in codes {
            h.controller.handle_key_event(key(code)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn ctrl_c_quits_even_while_typing() {
        let h = default_harness();
        press_all(&h, [KeyCode::Char('/')]).await;
        h.controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(h.model.should_quit().await);
    }

    #[tokio::test]
    async fn search_mode_captures_letters() {
        let h = default_harness();
        press_all(&h, [KeyCode::Char('/'), KeyCode::Char('q'), KeyCode::Char('?')]).await;

        assert!(!h.model.should_quit().await);
        assert!(!h.model.is_help_popup_open().await);
        assert_eq!(h.model.get_discovery_view().await.search_text, "q?");

        press_all(&h, [KeyCode::Esc, KeyCode::Char('c')]).await;
        assert!(!h.model.get_ui_state().await.search_editing);
        assert!(h.model.get_discovery_view().await.category.is_some());
    }

    #[tokio::test]
    async fn escape_hides_the_toast_before_closing_the_detail() {
        let h = default_harness();
        press_all(&h, [KeyCode::Enter]).await;
        h.model.toasts.show(ToastKind::Info, "hello").await;

        press_all(&h, [KeyCode::Esc]).await;
        assert!(!h.model.toasts.is_visible().await);
        assert!(h.model.is_detail_open().await);

        press_all(&h, [KeyCode::Esc]).await;
        assert!(!h.model.is_detail_open().await);
    }

    #[tokio::test]
    async fn help_popup_blocks_other_keys() {
        let h = default_harness();
        press_all(&h, [KeyCode::Char('?'), KeyCode::Tab]).await;
        assert!(h.model.is_help_popup_open().await);
        assert_eq!(h.model.get_ui_state().await.screen, Screen::Spots);

        press_all(&h, [KeyCode::Esc, KeyCode::Tab]).await;
        assert_eq!(h.model.get_ui_state().await.screen, Screen::AddSpot);
    }

    #[tokio::test]
    async fn form_keys_edit_the_draft() {
        let h = default_harness();
        press_all(&h, [KeyCode::Tab, KeyCode::Char('c'), KeyCode::Char('q')]).await;
        assert_eq!(h.model.get_form_draft().await.name, "cq");

        for _ in 0..3 {
            press_all(&h, [KeyCode::Down]).await;
        }
        assert_eq!(h.model.get_ui_state().await.form_field, FormField::Category);
        press_all(&h, [KeyCode::Right]).await;
        assert!(h.model.get_form_draft().await.category.is_some());
    }

    #[tokio::test]
    async fn backspace_on_empty_tip_input_removes_the_last_tip() {
        let h = default_harness();
        h.model.ui_state.lock().await.screen = Screen::AddSpot;
        h.model.ui_state.lock().await.form_field = FormField::Tips;

        press_all(&h, "Go at dawn".chars().map(KeyCode::Char)).await;
        press_all(&h, [KeyCode::Enter]).await;
        assert_eq!(h.model.get_form_draft().await.tips, vec!["Go at dawn"]);

        press_all(&h, [KeyCode::Backspace]).await;
        assert!(h.model.get_form_draft().await.tips.is_empty());
        assert_eq!(h.model.toasts.current().await.unwrap().message, "Tip removed");
    }

    #[tokio::test]
    async fn invalid_submit_from_the_keyboard_reports_the_first_field() {
        let h = default_harness();
        h.model.ui_state.lock().await.screen = Screen::AddSpot;
        h.model.ui_state.lock().await.form_field = FormField::Submit;

        press_all(&h, [KeyCode::Enter]).await;
        let history = loop {
            let history = h.model.toasts.history().await;
            if !history.is_empty() {
                break history;
            }
            tokio::task::yield_now().await;
        };

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "Please enter a spot name");
    }
}
