//! Detail lookup by run id

use crate::catalog::{Catalog, Run};

/// Outcome of a detail lookup. A miss is terminal for that id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Run),
    NotFound,
}

impl<'a> Lookup<'a> {
    #[allow(dead_code)]
    pub fn run(self) -> Option<&'a Run> {
        match self {
            Lookup::Found(run) => Some(run),
            Lookup::NotFound => None,
        }
    }
}

/// Find a run by exact id
pub fn find_run<'a>(catalog: &'a Catalog, id: &str) -> Lookup<'a> {
    match catalog.runs().iter().find(|run| run.id == id) {
        Some(run) => Lookup::Found(run),
        None => Lookup::NotFound,
    }
}
