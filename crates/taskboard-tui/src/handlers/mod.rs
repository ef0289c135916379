pub mod auth_handlers;
pub mod board_handlers;
pub mod dialog_handlers;

use crate::app::App;
use crate::events::is_interrupt;
use chrono::Utc;
use crossterm::event::KeyEvent;
use taskboard_domain::Route;

impl App {
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if is_interrupt(&key) {
            self.quit();
            return;
        }
        match self.route {
            Route::Login => self.handle_login_key(key).await,
            Route::Signup => self.handle_signup_key(key).await,
            Route::Dashboard => {
                self.ensure_session(Utc::now()).await;
                // A rejected refresh signs out.
                if self.route == Route::Dashboard {
                    self.handle_dashboard_key(key).await;
                }
            }
        }
    }
}
