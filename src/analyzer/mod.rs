//! History analysis: finding version candidates in the commit graph

pub mod candidate_search;

pub use candidate_search::{find_candidates, Candidate, TagVersion};
