use crate::FilterSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the fetch collaborator for one raw API page.
    FetchPage {
        page: u32,
        filters: FilterSet,
        limit: u32,
    },
}
