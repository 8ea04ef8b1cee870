use std::fmt::Write;
use std::sync::Arc;
use log::{error, info, warn};

use crate::{
    Contact,
    ContactApi,
    ContactForm,
    Field,
    FieldErrors,
    QueryClient,
    QueryKey,
    Mutation,
    Error,
    error::Result,
    validation,
};

use super::Route;

pub const SAVE_LABEL: &str = "Save";
pub const SENDING_LABEL: &str = "Sending...";
pub const LOADING_TEXT: &str = "Loading contact...";
pub const SAVE_FALLBACK_ERROR: &str = "Failed to save contact";
pub const LOAD_ERROR_PREFIX: &str = "Failed to load contact: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "New Contact",
            FormMode::Edit(_) => "Edit Contact",
        }
    }

    /// The form mode a route opens, if it is a form route.
    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::NewContact => Some(FormMode::Create),
            Route::EditContact(id) => Some(FormMode::Edit(id.clone())),
            Route::Contacts => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode only: waiting for the existing record.
    Loading,
    /// Edit mode only: the record could not be loaded, saving stays off.
    LoadFailed,
    Idle,
    Validating,
    Submitting,
    Succeeded,
}

/// Create/edit form for one contact.
///
/// Submission goes `Idle -> Validating -> Submitting`, then either
/// navigates to the list on success or drops back to `Idle` with a banner.
/// Invalid input never leaves `Validating` for `Submitting`.
pub struct ContactFormView {
    api     : Arc<dyn ContactApi>,
    queries : Arc<QueryClient>,

    mode    : FormMode,
    phase   : FormPhase,
    values  : ContactForm,
    errors  : FieldErrors,
    banner  : Option<String>,

    submission: Mutation<()>,
}

impl ContactFormView {
    pub fn new(api: Arc<dyn ContactApi>, queries: Arc<QueryClient>, mode: FormMode) -> Self {
        let phase = match mode {
            FormMode::Create => FormPhase::Idle,
            FormMode::Edit(_) => FormPhase::Loading,
        };

        Self {
            api,
            queries,
            mode,
            phase,
            values  : ContactForm::default(),
            errors  : FieldErrors::default(),
            banner  : None,
            submission: Mutation::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn values(&self) -> &ContactForm {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn set(&mut self, field: Field, value: &str) {
        self.values.set(field, value);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submission.is_pending() || matches!(
            self.phase,
            FormPhase::Loading | FormPhase::LoadFailed
        )
    }

    pub fn submit_label(&self) -> &'static str {
        match self.submission.is_pending() {
            true => SENDING_LABEL,
            false => SAVE_LABEL,
        }
    }

    /// Pre-populates the fields from the stored record in edit mode.
    pub async fn load(&mut self) -> Result<()> {
        let FormMode::Edit(id) = self.mode.clone() else {
            return Ok(());
        };

        self.phase = FormPhase::Loading;
        match self.queries.fetch_contact(&self.api, &id).await {
            Ok(contact) => {
                self.phase = FormPhase::Idle;
                self.banner = None;
                self.fill(&contact);
                Ok(())
            },
            Err(e) => {
                error!("Loading contact {} error: {}", id, e);
                self.phase = FormPhase::LoadFailed;
                self.banner = Some(format!("{}{}", LOAD_ERROR_PREFIX, e));
                Err(e)
            }
        }
    }

    pub fn fill(&mut self, contact: &Contact) {
        self.values = ContactForm::from(contact);
        self.errors.clear();
    }

    /// Validates the fields and, when they pass, enters `Submitting` and
    /// hands back the payload to send. Returns `None` when nothing should
    /// be sent.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.is_submit_disabled() {
            warn!("Submission ignored, form is busy");
            return None;
        }

        self.phase = FormPhase::Validating;
        if let Err(errors) = validation::validate(&self.values) {
            self.errors = errors;
            self.phase = FormPhase::Idle;
            return None;
        }

        self.errors.clear();
        if self.submission.begin().is_err() {
            self.phase = FormPhase::Idle;
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.values.clone())
    }

    /// Records the remote outcome; returns where to navigate on success.
    pub fn finish_submit(&mut self, result: Result<()>) -> Option<Route> {
        match self.submission.settle(result) {
            Ok(()) => {
                self.banner = None;
                self.phase = FormPhase::Succeeded;
                self.queries.invalidate(&QueryKey::contacts());
                if let FormMode::Edit(id) = &self.mode {
                    self.queries.invalidate(&QueryKey::contact(id));
                }
                Some(Route::Contacts)
            },
            Err(e) => {
                self.banner = Some(Self::banner_text(&e));
                self.phase = FormPhase::Idle;
                None
            }
        }
    }

    pub async fn submit(&mut self) -> Option<Route> {
        let payload = self.begin_submit()?;

        let result = match &self.mode {
            FormMode::Create => self.api.create_contact(&payload).await.map(|created| {
                if let Some(c) = created {
                    info!("Contact created with id {}", c.id());
                }
            }),
            FormMode::Edit(id) => self.api.update_contact(id, &payload).await.map(|_| {
                info!("Contact {} updated", id);
            }),
        };

        if let Err(e) = result.as_ref() {
            warn!("Saving contact error: {}", e);
        }
        self.finish_submit(result)
    }

    fn banner_text(err: &Error) -> String {
        err.remote_message()
            .unwrap_or(SAVE_FALLBACK_ERROR)
            .to_string()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        _ = writeln!(out, "{}", self.mode.title());

        if self.phase == FormPhase::Loading {
            _ = writeln!(out, "{}", LOADING_TEXT);
            return out;
        }

        for field in Field::ALL {
            _ = writeln!(out, "{:<6}: {}", field.label(), self.values.get(field));
            if let Some(msg) = self.errors.get(field) {
                _ = writeln!(out, "        ! {}", msg);
            }
        }

        if let Some(banner) = self.banner.as_ref() {
            _ = writeln!(out, "! {}", banner);
        }

        let state = match self.is_submit_disabled() {
            true => " (disabled)",
            false => "",
        };
        _ = writeln!(out, "[ {} ]{}", self.submit_label(), state);
        out
    }
}
