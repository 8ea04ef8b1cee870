use std::future::Future;

use crate::{
    Error,
    error::Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error(String),
}

/// Lifecycle of one state-changing request. A mutation that is still
/// pending refuses to start again.
pub struct Mutation<T> {
    status  : MutationStatus,
    data    : Option<T>,
    error   : Option<Error>,
}

impl<T> Default for Mutation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mutation<T> {
    pub fn new() -> Self {
        Self {
            status  : MutationStatus::Idle,
            data    : None,
            error   : None,
        }
    }

    pub fn status(&self) -> &MutationStatus {
        &self.status
    }

    pub fn is_idle(&self) -> bool {
        self.status == MutationStatus::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, MutationStatus::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn begin(&mut self) -> Result<()> {
        if self.is_pending() {
            return Err(Error::State("Mutation is already in progress".into()));
        }
        self.status = MutationStatus::Pending;
        self.data = None;
        self.error = None;
        Ok(())
    }

    pub fn settle(&mut self, result: Result<T>) -> Result<T>
    where
        T: Clone,
    {
        match result {
            Ok(v) => {
                self.status = MutationStatus::Success;
                self.data = Some(v.clone());
                Ok(v)
            },
            Err(e) => {
                self.status = MutationStatus::Error(e.to_string());
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub async fn run<F>(&mut self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
        T: Clone,
    {
        self.begin()?;
        let result = fut.await;
        self.settle(result)
    }

    pub fn reset(&mut self) {
        self.status = MutationStatus::Idle;
        self.data = None;
        self.error = None;
    }
}
