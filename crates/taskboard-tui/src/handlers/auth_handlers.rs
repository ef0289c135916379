use crate::app::App;
use crate::dialog::{handle_dialog_input, DialogAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_domain::{Credentials, Route, SignUpForm, Text};

impl App {
    pub async fn handle_login_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.navigate(Route::Signup),
                KeyCode::Char('l') => self.toggle_language().await,
                _ => {}
            }
            return;
        }
        match handle_dialog_input(self.login_form.focused_mut(), key.code) {
            DialogAction::Cancel => self.quit(),
            DialogAction::NextField => self.login_form.focus_next(),
            DialogAction::PrevField => self.login_form.focus_prev(),
            DialogAction::Confirm => self.submit_login().await,
            DialogAction::None => {}
        }
    }

    pub async fn handle_signup_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.navigate(Route::Login),
                KeyCode::Char('l') => self.toggle_language().await,
                _ => {}
            }
            return;
        }
        match handle_dialog_input(self.signup_form.focused_mut(), key.code) {
            DialogAction::Cancel => self.navigate(Route::Login),
            DialogAction::NextField => self.signup_form.focus_next(),
            DialogAction::PrevField => self.signup_form.focus_prev(),
            DialogAction::Confirm => self.submit_signup().await,
            DialogAction::None => {}
        }
    }

    async fn submit_login(&mut self) {
        let credentials = Credentials::new(
            self.login_form.value(Text::Email),
            self.login_form.value(Text::Password),
        );
        if let Ok(session) = self.auth.sign_in(&credentials).await {
            self.login_form.clear();
            self.enter_dashboard(session).await;
        }
    }

    async fn submit_signup(&mut self) {
        let form = SignUpForm {
            full_name: self.signup_form.value(Text::FullName).to_string(),
            email: self.signup_form.value(Text::Email).to_string(),
            password: self.signup_form.value(Text::Password).to_string(),
        };
        if let Ok(outcome) = self.auth.sign_up(&form).await {
            self.signup_form.clear();
            self.login_form.clear();
            self.login_form.set_value(Text::Email, form.email.trim());
            self.navigate(outcome.next_route());
        }
    }
}
