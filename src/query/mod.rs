pub mod query_key;
pub mod query_cache;
pub mod query_client;
pub mod mutation;

pub use self::{
    query_key::QueryKey,
    query_cache::{QueryCache, QueryState},
    query_client::QueryClient,
    mutation::{Mutation, MutationStatus},
};

#[cfg(test)]
mod unitests;
