mod test_query_key;
mod test_query_cache;
mod test_mutation;
