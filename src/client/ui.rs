//! User-facing feedback and navigation collaborators

use std::time::Duration;

pub const MSG_SELECT_IMAGE: &str = "Selecione uma imagem!";
pub const MSG_FILL_ALL_FIELDS: &str = "Preencha todos os campos!";
pub const MSG_LOGIN_REQUIRED: &str = "Faça login para publicar uma reserva!";
pub const MSG_INVALID_NUMBERS: &str = "Informe valores numéricos válidos!";
pub const MSG_PUBLISHED: &str = "Reserva publicada com sucesso!";

/// Page listing the hotelier's reservations
pub const LISTING_ROUTE: &str = "/hotelier-reservations";

/// Time the success toast stays visible before leaving the form
pub const NAVIGATION_DELAY: Duration = Duration::from_secs(3);

/// Transient toast-style notifications
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait Navigator: Send + Sync {
    /// Previous page in history
    fn back(&self);
    fn navigate(&self, route: &str);
}
