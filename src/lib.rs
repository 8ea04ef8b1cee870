pub mod core;
pub mod remote;
pub mod query;
pub mod views;

pub use crate::core::{
    error::{self, Error},
    contact::{self, Contact, ContactForm, Field},
    validation::{self, FieldErrors},
    config::{self, Config},
    default_configuration as configuration,
    setup_logger,
    teardown_logger,
};

pub use crate::remote::{
    api_client::{self, APIClient},
    ContactApi,
};

pub use crate::query::{
    query_key::QueryKey,
    query_cache::{QueryCache, QueryState},
    query_client::QueryClient,
    mutation::{Mutation, MutationStatus},
};

pub use crate::views::{
    route::Route,
    list_view::ContactListView,
    form_view::{ContactFormView, FormMode, FormPhase},
};
