pub mod route;
pub mod list_view;
pub mod form_view;

pub use self::{
    route::Route,
    list_view::ContactListView,
    form_view::{ContactFormView, FormMode, FormPhase},
};

#[cfg(test)]
mod unitests;
